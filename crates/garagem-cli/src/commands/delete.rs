use garagem_core::CarRepository;

use crate::commands::common::{build_repository, require_car_id};
use crate::error::CliError;

pub async fn run_delete(api_url: Option<&str>, id: &str) -> Result<(), CliError> {
    let id = require_car_id(id)?;
    let repo = build_repository(api_url)?;
    repo.delete_car(id).await?;

    println!("Deleted car {id}");
    Ok(())
}
