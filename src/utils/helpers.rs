use crate::models::Report;
use std::fs;
use std::path::Path;

pub fn render_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn save_report(file_path: &Path, report: &Report) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(file_path, render_report(report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;

    fn empty_report() -> Report {
        Report {
            total_amount: Amount::zero(),
            total_rewards: Amount::zero(),
            delegations: vec![],
        }
    }

    #[test]
    fn writes_report_json() {
        let path = std::env::temp_dir().join(format!("report-{}.json", std::process::id()));
        save_report(&path, &empty_report()).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"total_amount": 0.0, "total_rewards": 0.0, "delegations": []})
        );
    }
}
