//! Fixed demonstration sequence for the `trains` program.

use crate::domain::Train;
use crate::error::AppError;
use crate::service::TrainService;
use std::io::Write;

/// Id the freshly added train receives after a reset (two seeds come first).
const ADDED_TRAIN_ID: i64 = 3;
const REMOVED_TRAIN_ID: i64 = 1;
const MILEAGE_BUMP: f32 = 10_000.0;

/// Reset the table, add one train, bump its mileage, remove the first seed.
pub async fn run(service: &TrainService, out: &mut impl Write) -> Result<(), AppError> {
    service.ensure_populate().await?;
    writeln!(out, "Database populated with {} trains", Train::test_data().len())?;

    let new_train = Train::demo_addition();
    let id = service.add_train(&new_train).await?;
    writeln!(out, "Added train {} ({})", id, new_train.carrier)?;

    if let Some(mut current) = service.get_train_by_id(ADDED_TRAIN_ID).await? {
        current.mileage += MILEAGE_BUMP;
        service.update_train(&current).await?;
        writeln!(
            out,
            "Updated train {} mileage to {}",
            current.id, current.mileage
        )?;
    }

    if let Some(to_delete) = service.get_train_by_id(REMOVED_TRAIN_ID).await? {
        service.remove_train(&to_delete).await?;
        writeln!(out, "Removed train {} ({})", to_delete.id, to_delete.carrier)?;
    }

    writeln!(out, "Operations completed!")?;
    Ok(())
}
