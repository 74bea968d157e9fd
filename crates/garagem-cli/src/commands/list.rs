use garagem_core::CarRepository;

use crate::commands::common::{build_repository, car_to_list_item, format_car_lines, CarListItem};
use crate::error::CliError;

pub async fn run_list(api_url: Option<&str>, as_json: bool) -> Result<(), CliError> {
    let repo = build_repository(api_url)?;
    let cars = repo.get_cars().await?;

    if as_json {
        let json_items = cars.iter().map(car_to_list_item).collect::<Vec<CarListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_car_lines(&cars) {
            println!("{line}");
        }
    }

    Ok(())
}
