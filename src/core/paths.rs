use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Directory from a CLI override, falling back to the configured value.
pub fn resolve_dir(configured: &str, cli_override: Option<&Path>) -> PathBuf {
    cli_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(configured))
}

/// Workbook file name stamped with the run time, e.g. `Auto_MTO_20260116_093015.xlsx`.
pub fn workbook_file_name(at: &NaiveDateTime) -> String {
    at.format("Auto_MTO_%Y%m%d_%H%M%S.xlsx").to_string()
}

/// Workbook path inside the output directory
pub fn workbook(output_dir: &Path, at: &NaiveDateTime) -> PathBuf {
    output_dir.join(workbook_file_name(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 16)
            .unwrap()
            .and_hms_opt(9, 30, 15)
            .unwrap()
    }

    #[test]
    fn workbook_name_is_zero_padded_timestamp() {
        assert_eq!(workbook_file_name(&sample_time()), "Auto_MTO_20260116_093015.xlsx");
    }

    #[test]
    fn workbook_lives_in_output_dir() {
        let path = workbook(Path::new("mto_out"), &sample_time());
        assert_eq!(path, Path::new("mto_out").join("Auto_MTO_20260116_093015.xlsx"));
    }

    #[test]
    fn cli_override_wins() {
        assert_eq!(resolve_dir("pdf_in", None), PathBuf::from("pdf_in"));
        assert_eq!(
            resolve_dir("pdf_in", Some(Path::new("/jobs/42"))),
            PathBuf::from("/jobs/42")
        );
    }
}
