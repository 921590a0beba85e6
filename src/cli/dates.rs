//! Date parsing command

use anyhow::Result;

use super::output::Output;
use crate::storage::Config;

/// Normalize a raw date and report the matching format
pub fn parse(output: &Output, config: &Config, raw: &str) -> Result<()> {
    let normalizer = config.project.date_normalizer();
    output.verbose_ctx(
        "parse-date",
        &format!(
            "Trying formats: {}",
            normalizer
                .formats()
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    );

    let (date, format) = normalizer.normalize_with_format(raw)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "input": raw,
            "date": date,
            "format": format,
        }));
    } else {
        println!("{}", date.to_rfc3339());
        println!("format: {} ({})", format, format.layout());
    }

    Ok(())
}
