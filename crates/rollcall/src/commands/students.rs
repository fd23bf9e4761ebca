//! Student record command handlers.

use secrecy::SecretString;
use tabled::Tabled;

use rollcall_api::RegistryClient;
use rollcall_core::{Registrar, StudentRecord, table};

use crate::cli::{AddArgs, EditArgs, GlobalOpts, StudentsArgs, StudentsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

/// Table row for the listing, one column per registry field.
#[derive(Tabled)]
pub struct StudentRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Last Name")]
    pub last_name: String,
    #[tabled(rename = "First Name")]
    pub first_name: String,
    #[tabled(rename = "Middle Initial")]
    pub middle_initial: String,
    #[tabled(rename = "Course")]
    pub course: String,
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "Gender")]
    pub gender: String,
    #[tabled(rename = "Graduating")]
    pub graduating: &'static str,
}

impl From<&StudentRecord> for StudentRow {
    fn from(record: &StudentRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
            middle_initial: record.middle_initial.clone(),
            course: record.course.clone(),
            year: record.year,
            gender: record.gender.clone(),
            graduating: table::graduating_label(record.graduating),
        }
    }
}

pub async fn handle(
    client: RegistryClient,
    args: StudentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let token = util::require_token()?;
    let mut registrar = Registrar::new(client, token);

    match args.command {
        StudentsCommand::List => {
            registrar.refresh().await?;
            let snapshot = registrar.store().snapshot();
            let rendered = output::render_list(
                &global.output,
                &snapshot,
                |record| StudentRow::from(record),
                |record| record.id.to_string(),
            );
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        StudentsCommand::Add(args) => add(&mut registrar, args, global).await,

        StudentsCommand::Edit(args) => edit(&mut registrar, args, global).await,

        StudentsCommand::Delete { id } => {
            registrar.refresh().await?;
            let record = registrar
                .store()
                .get(id)
                .ok_or(CliError::StudentNotFound { id })?;

            let prompt = format!("Delete student {id} ({})? This cannot be undone.", record.email);
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }

            registrar.remove(id).await?;
            if !global.quiet {
                eprintln!("Student {id} deleted");
            }
            Ok(())
        }
    }
}

async fn add(registrar: &mut Registrar, args: AddArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let password = match args.password {
        Some(password) => password,
        None => util::prompt_password("Password for the new account: ")?,
    };

    let intent = registrar.begin_create();
    intent.form.email = args.email;
    intent.form.last_name = args.last_name;
    intent.form.first_name = args.first_name;
    intent.form.middle_initial = args.middle_initial;
    intent.form.course = args.course;
    intent.form.year = args.year;
    intent.form.gender = args.gender;
    intent.form.graduating = args.graduating;
    intent.form.password = SecretString::from(password);

    registrar.submit().await?;
    if !global.quiet {
        eprintln!("Student registered");
    }
    Ok(())
}

async fn edit(
    registrar: &mut Registrar,
    args: EditArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Resolve against a fresh snapshot; begin_edit treats an unknown id
    // as a caller bug.
    registrar.refresh().await?;
    if registrar.store().get(args.id).is_none() {
        return Err(CliError::StudentNotFound { id: args.id });
    }

    let intent = registrar.begin_edit(args.id);
    if let Some(last_name) = args.last_name {
        intent.fields.last_name = last_name;
    }
    if let Some(first_name) = args.first_name {
        intent.fields.first_name = first_name;
    }
    if let Some(middle_initial) = args.middle_initial {
        intent.fields.middle_initial = middle_initial;
    }
    if let Some(course) = args.course {
        intent.fields.course = course;
    }
    if let Some(year) = args.year {
        intent.fields.year = year;
    }
    if let Some(gender) = args.gender {
        intent.fields.gender = gender;
    }
    if let Some(graduating) = args.graduating {
        intent.fields.graduating = graduating;
    }

    registrar.submit().await?;
    if !global.quiet {
        eprintln!("Student {} updated", args.id);
    }
    Ok(())
}
