use crate::context::CliContext;
use crate::output::OutputFormatter;
use clap::Subcommand;
use firewatch::model::CoverageAssignment;
use firewatch::FirewatchResult;

#[derive(Subcommand, Debug)]
pub enum StationCommand {
    /// Assign an address to a station
    Add { address: String, station: u32 },

    /// Move an assigned address to another station
    Update { address: String, station: u32 },

    /// Remove the assignment of an address; unknown addresses are not an error
    Delete { address: String },

    /// Everyone living at addresses covered by a station, with an adult/child count
    Covered {
        #[arg(allow_negative_numbers = true)]
        station: i64,
    },
}

pub fn execute(ctx: &mut CliContext, command: StationCommand) -> FirewatchResult<()> {
    let formatter = OutputFormatter::new(ctx.output_format);

    match command {
        StationCommand::Add { address, station } => {
            ctx.services()?
                .coverage
                .add(CoverageAssignment::new(&address, station))?;
            formatter.success(&format!("{} is now covered by station {}", address, station));
        }
        StationCommand::Update { address, station } => {
            let updated = ctx
                .services()?
                .coverage
                .update(CoverageAssignment::new(&address, station))?;
            if formatter.is_json() {
                formatter.json(&updated);
            } else {
                formatter.success(&format!(
                    "{} moved to station {}",
                    updated.address, updated.station
                ));
            }
        }
        StationCommand::Delete { address } => {
            ctx.services()?.coverage.delete(&address)?;
            formatter.success(&format!("Removed coverage of {}", address));
        }
        StationCommand::Covered { station } => {
            let covered = ctx.services()?.coverage.covered_people(station)?;
            if formatter.is_json() {
                formatter.json(&covered);
            } else {
                let rows: Vec<Vec<String>> = covered
                    .persons
                    .iter()
                    .map(|p| {
                        vec![
                            p.first_name.clone(),
                            p.last_name.clone(),
                            p.address.clone(),
                            p.phone.clone(),
                        ]
                    })
                    .collect();
                formatter.table(&["First name", "Last name", "Address", "Phone"], &rows);
                formatter.kv("Adults", &covered.adults.to_string());
                formatter.kv("Children", &covered.children.to_string());
            }
        }
    }

    Ok(())
}
