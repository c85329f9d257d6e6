use super::PayloadArgs;
use crate::context::CliContext;
use crate::output::OutputFormatter;
use clap::Subcommand;
use firewatch::model::Resident;
use firewatch::FirewatchResult;

#[derive(Subcommand, Debug)]
pub enum ResidentCommand {
    /// Add a resident
    Add(PayloadArgs),

    /// Replace the address and contact details of a resident
    Update(PayloadArgs),

    /// Remove a resident; removing someone unknown is not an error
    Delete {
        first_name: String,
        last_name: String,
    },
}

pub fn execute(ctx: &mut CliContext, command: ResidentCommand) -> FirewatchResult<()> {
    let formatter = OutputFormatter::new(ctx.output_format);

    match command {
        ResidentCommand::Add(payload) => {
            let resident: Resident = payload.parse("resident")?;
            let id = resident.id();
            ctx.services()?.residents.add(resident)?;
            formatter.success(&format!("Added resident {}", id));
        }
        ResidentCommand::Update(payload) => {
            let resident: Resident = payload.parse("resident")?;
            let updated = ctx.services()?.residents.update(resident)?;
            if formatter.is_json() {
                formatter.json(&updated);
            } else {
                formatter.success(&format!("Updated resident {}", updated.id()));
                formatter.kv("Address", &updated.full_address());
                formatter.kv("Phone", &updated.phone);
                formatter.kv("Email", &updated.email);
            }
        }
        ResidentCommand::Delete {
            first_name,
            last_name,
        } => {
            ctx.services()?.residents.delete(&first_name, &last_name)?;
            formatter.success(&format!("Deleted resident {} {}", first_name, last_name));
        }
    }

    Ok(())
}
