use crate::api::Endpoint;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::table::Table;

/// Print every gateway endpoint with its resolved URL.
pub fn handle(cfg: &Config) -> AppResult<()> {
    header("Webhook endpoints");
    println!("Base URL      : {}", cfg.webhook_base);
    println!(
        "Account field : {} = {}\n",
        cfg.account_field,
        if cfg.account_id.is_empty() { "(unset)" } else { &cfg.account_id }
    );

    let mut table = Table::new(["Operation", "URL"]);
    for endpoint in Endpoint::ALL {
        table.add_row(vec![
            endpoint.to_string(),
            cfg.endpoints.url(&cfg.webhook_base, endpoint),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
