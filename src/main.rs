//! ShiftTrack main entrypoint.

use shifttrack::errors::AppError;
use shifttrack::run;
use shifttrack::ui::messages::{alert, error};

fn main() {
    if let Err(e) = run() {
        match &e {
            AppError::Alert(_) => alert(e.user_message()),
            _ => error(format!("Error: {}", e.user_message())),
        }
        std::process::exit(1);
    }
}
