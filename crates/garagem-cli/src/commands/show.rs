use garagem_core::CarRepository;

use crate::commands::common::{build_repository, format_detail_lines, require_car_id};
use crate::error::CliError;

pub async fn run_show(api_url: Option<&str>, id: &str, as_json: bool) -> Result<(), CliError> {
    let id = require_car_id(id)?;
    let repo = build_repository(api_url)?;
    let detail = repo.get_car_by_id(id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        for line in format_detail_lines(&detail) {
            println!("{line}");
        }
    }

    Ok(())
}
