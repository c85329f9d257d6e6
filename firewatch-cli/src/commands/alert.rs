use crate::context::CliContext;
use crate::output::{joined, OutputFormatter};
use clap::Subcommand;
use firewatch::FirewatchResult;

#[derive(Subcommand, Debug)]
pub enum AlertCommand {
    /// Children living at an address, with their household
    Child {
        /// Street address, matched exactly
        address: String,
    },

    /// Phone numbers of everyone covered by a station
    Phone {
        #[arg(allow_negative_numbers = true)]
        station: i64,
    },

    /// Residents of an address with medical details and the station covering it
    Fire {
        address: String,
    },

    /// Households covered by a list of stations
    Flood {
        /// Comma separated station numbers, e.g. 1,2,3
        #[arg(
            required = true,
            value_delimiter = ',',
            allow_negative_numbers = true
        )]
        stations: Vec<i64>,
    },

    /// Everybody with a last name (case-insensitive)
    PersonInfo {
        last_name: String,
    },

    /// Email addresses of a city's residents (case-insensitive)
    CommunityEmail {
        city: String,
    },
}

pub fn execute(ctx: &mut CliContext, command: AlertCommand) -> FirewatchResult<()> {
    let formatter = OutputFormatter::new(ctx.output_format);
    let alerts = &ctx.services()?.alerts;

    match command {
        AlertCommand::Child { address } => {
            let children = alerts.children_at_address(&address)?;
            if formatter.is_json() {
                formatter.json(&children);
            } else if children.is_empty() {
                formatter.success(&format!("No children at {}", address));
            } else {
                let rows: Vec<Vec<String>> = children
                    .iter()
                    .map(|c| {
                        vec![
                            c.first_name.clone(),
                            c.last_name.clone(),
                            c.age.to_string(),
                            joined(&c.household),
                        ]
                    })
                    .collect();
                formatter.table(&["First name", "Last name", "Age", "Household"], &rows);
            }
        }
        AlertCommand::Phone { station } => {
            let phones = alerts.phones_by_coverage_number(station)?;
            if formatter.is_json() {
                formatter.json(&phones);
            } else if phones.is_empty() {
                formatter.success(&format!("No phone numbers for station {}", station));
            } else {
                for phone in &phones {
                    formatter.list_item(phone);
                }
            }
        }
        AlertCommand::Fire { address } => {
            let report = alerts.household_and_coverage(&address)?;
            if formatter.is_json() {
                formatter.json(&report);
            } else {
                let station = report
                    .coverage_number
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "none".to_string());
                formatter.kv("Station", &station);
                let rows: Vec<Vec<String>> = report
                    .residents
                    .iter()
                    .map(|r| {
                        vec![
                            format!("{} {}", r.first_name, r.last_name),
                            r.phone.clone(),
                            r.age.to_string(),
                            joined(&r.medications),
                            joined(&r.allergies),
                        ]
                    })
                    .collect();
                formatter.table(&["Name", "Phone", "Age", "Medications", "Allergies"], &rows);
            }
        }
        AlertCommand::Flood { stations } => {
            let households = alerts.households_by_coverage_numbers(&stations)?;
            if formatter.is_json() {
                formatter.json(&households);
            } else {
                for household in &households {
                    formatter.section(&household.address);
                    if household.occupants.is_empty() {
                        formatter.list_item("nobody lives here");
                        continue;
                    }
                    let rows: Vec<Vec<String>> = household
                        .occupants
                        .iter()
                        .map(|o| {
                            vec![
                                format!("{} {}", o.first_name, o.last_name),
                                o.phone.clone(),
                                o.age.to_string(),
                                joined(&o.medications),
                                joined(&o.allergies),
                            ]
                        })
                        .collect();
                    formatter.table(&["Name", "Phone", "Age", "Medications", "Allergies"], &rows);
                }
            }
        }
        AlertCommand::PersonInfo { last_name } => {
            let people = alerts.people_by_last_name(&last_name)?;
            if formatter.is_json() {
                formatter.json(&people);
            } else {
                let rows: Vec<Vec<String>> = people
                    .iter()
                    .map(|p| {
                        vec![
                            format!("{} {}", p.first_name, p.last_name),
                            p.address.clone(),
                            p.age.to_string(),
                            p.email.clone(),
                            joined(&p.medications),
                            joined(&p.allergies),
                        ]
                    })
                    .collect();
                formatter.table(
                    &["Name", "Address", "Age", "Email", "Medications", "Allergies"],
                    &rows,
                );
            }
        }
        AlertCommand::CommunityEmail { city } => {
            let emails = alerts.emails_by_city(&city)?;
            if formatter.is_json() {
                formatter.json(&emails);
            } else {
                for email in &emails {
                    formatter.list_item(email);
                }
            }
        }
    }

    Ok(())
}
