use dotenv::dotenv;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use portfolio_sample::config::StoreConfig;
use portfolio_sample::controller::{FieldChange, SampleController};
use portfolio_sample::record::SampleId;
use portfolio_sample::store::{RemoteSampleStore, SampleStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Reads SUPABASE_URL and SUPABASE_KEY
    let config = StoreConfig::from_env()?;
    let store = RemoteSampleStore::new(&config);
    let mut controller = SampleController::new(store);

    println!("Sample record admin");
    println!("Commands: list | add | edit <id> | set <field> <value> | submit | del <id> | quit");

    match controller.refresh().await {
        Ok(()) => print_records(&controller),
        Err(error) => eprintln!("Could not load records: {}", error),
    }

    loop {
        let line = match prompt("> ")? {
            Some(line) => line,
            None => break,
        };

        let mut parts = line.splitn(3, ' ');
        match parts.next().unwrap_or("") {
            "list" => match controller.refresh().await {
                Ok(()) => print_records(&controller),
                Err(error) => eprintln!("Could not load records: {}", error),
            },
            "add" => {
                if controller.editing().is_some() {
                    eprintln!("An edit is in progress; submit it first");
                    continue;
                }
                add_record(&mut controller).await?;
            }
            "edit" => match parse_id(parts.next()) {
                Some(id) => {
                    if controller.begin_edit(id) {
                        print_draft(&controller);
                    } else {
                        eprintln!("No listed record with id {}", id);
                    }
                }
                None => eprintln!("Usage: edit <id>"),
            },
            "set" => match field_change(parts.next(), parts.next()) {
                Some(change) => {
                    controller.set_field(change);
                    print_draft(&controller);
                }
                None => eprintln!("Usage: set <title|name|phone|is_auth> <value>"),
            },
            "submit" => {
                let updating = controller.editing().is_some();
                match controller.submit().await {
                    Ok(()) => {
                        println!("{}", if updating { "Record updated" } else { "Record created" });
                        print_records(&controller);
                    }
                    Err(error) => eprintln!("Submit failed: {}", error),
                }
            }
            "del" => match parse_id(parts.next()) {
                Some(id) => match controller.delete(id).await {
                    Ok(()) => {
                        println!("Record {} deleted", id);
                        print_records(&controller);
                    }
                    Err(error) => eprintln!("Delete failed: {}", error),
                },
                None => eprintln!("Usage: del <id>"),
            },
            "quit" | "exit" => break,
            "" => continue,
            other => eprintln!("Unknown command: {}", other),
        }
    }

    Ok(())
}

/// Guided creation: one prompt per field, then submit
async fn add_record<S: SampleStore>(
    controller: &mut SampleController<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let fields = (
        prompt("Title: ")?,
        prompt("Name: ")?,
        prompt("Phone number: ")?,
        prompt("Authorized (y/n): ")?,
    );

    let (Some(title), Some(name), Some(phone), Some(is_auth)) = fields else {
        // EOF mid-entry abandons the draft
        return Ok(());
    };

    controller.set_field(FieldChange::Title(title));
    controller.set_field(FieldChange::Name(name));
    controller.set_field(FieldChange::PhoneNumber(phone));
    controller.set_field(FieldChange::IsAuth(parse_bool(&is_auth)));

    match controller.submit().await {
        Ok(()) => {
            println!("Record created");
            print_records(controller);
        }
        Err(error) => eprintln!("Submit failed: {}", error),
    }

    Ok(())
}

/// Read one trimmed line, or `None` on end of input
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut value = String::new();
    if io::stdin().read_line(&mut value)? == 0 {
        return Ok(None);
    }
    Ok(Some(value.trim().to_string()))
}

fn parse_id(arg: Option<&str>) -> Option<SampleId> {
    arg.and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(SampleId)
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "y" | "yes" | "true" | "1")
}

fn field_change(field: Option<&str>, value: Option<&str>) -> Option<FieldChange> {
    let value = value.unwrap_or("").trim();
    match field? {
        "title" => Some(FieldChange::Title(value.to_string())),
        "name" => Some(FieldChange::Name(value.to_string())),
        "phone" => Some(FieldChange::PhoneNumber(value.to_string())),
        "is_auth" => Some(FieldChange::IsAuth(parse_bool(value))),
        _ => None,
    }
}

fn print_records<S: SampleStore>(controller: &SampleController<S>) {
    let records = controller.records();
    if records.is_empty() {
        println!("(no records)");
        return;
    }

    for record in records {
        println!(
            "  [{}] {} | {} | {} | auth: {} | {}",
            record.id,
            record.title,
            record.name,
            record.phone_number,
            record.is_auth,
            record.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
}

fn print_draft<S: SampleStore>(controller: &SampleController<S>) {
    let draft = controller.draft();
    let mode = match controller.editing() {
        Some(id) => format!("updating record {}", id),
        None => "creating a new record".to_string(),
    };

    println!(
        "  Form ({}): title={:?} name={:?} phone={:?} is_auth={}",
        mode, draft.title, draft.name, draft.phone_number, draft.is_auth
    );
}
