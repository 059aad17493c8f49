use log::{error, info};
use uuid::Uuid;

/// Where human-facing progress and outcome messages go.
pub trait Reporter {
    fn info(&self, job_id: Uuid, message: &str);
    fn success(&self, job_id: Uuid, message: &str);
    fn error(&self, job_id: Uuid, message: &str);
}

/// Prints messages to the terminal, mirroring failures into the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, job_id: Uuid, message: &str) {
        info!("[Job {}] {}", job_id, message);
        println!("{}", message);
    }

    fn success(&self, job_id: Uuid, message: &str) {
        info!("[Job {}] {}", job_id, message);
        println!("✔ {}", message);
    }

    fn error(&self, job_id: Uuid, message: &str) {
        error!("[Job {}] {}", job_id, message);
        eprintln!("✘ {}", message);
    }
}
