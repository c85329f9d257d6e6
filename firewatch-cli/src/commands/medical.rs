use super::PayloadArgs;
use crate::context::CliContext;
use crate::output::{joined, OutputFormatter};
use clap::Subcommand;
use firewatch::model::MedicalRecord;
use firewatch::FirewatchResult;

#[derive(Subcommand, Debug)]
pub enum MedicalCommand {
    /// Add a medical record
    Add(PayloadArgs),

    /// Replace birth date, medications and allergies of a record
    Update(PayloadArgs),

    /// Remove a medical record; removing an unknown record is not an error
    Delete {
        first_name: String,
        last_name: String,
    },
}

pub fn execute(ctx: &mut CliContext, command: MedicalCommand) -> FirewatchResult<()> {
    let formatter = OutputFormatter::new(ctx.output_format);

    match command {
        MedicalCommand::Add(payload) => {
            let record: MedicalRecord = payload.parse("medical record")?;
            let id = record.id();
            ctx.services()?.medical_records.add(record)?;
            formatter.success(&format!("Added medical record for {}", id));
        }
        MedicalCommand::Update(payload) => {
            let record: MedicalRecord = payload.parse("medical record")?;
            let updated = ctx.services()?.medical_records.update(record)?;
            if formatter.is_json() {
                formatter.json(&updated);
            } else {
                formatter.success(&format!("Updated medical record for {}", updated.id()));
                formatter.kv("Birthdate", &updated.birth_date.format("%m/%d/%Y").to_string());
                formatter.kv("Medications", &joined(&updated.medications));
                formatter.kv("Allergies", &joined(&updated.allergies));
            }
        }
        MedicalCommand::Delete {
            first_name,
            last_name,
        } => {
            ctx.services()?
                .medical_records
                .delete(&first_name, &last_name)?;
            formatter.success(&format!(
                "Deleted medical record for {} {}",
                first_name, last_name
            ));
        }
    }

    Ok(())
}
