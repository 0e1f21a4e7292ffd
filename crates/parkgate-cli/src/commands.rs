use anyhow::{Context, Result, anyhow, bail};
use parkgate_attendant::ExitLookup;
use parkgate_core::{Clock, ExitQuery, Money, ServerConfig, SystemClock};
use parkgate_storage::{Database, DisplayMessages, NewOperator, SqliteVehicleRepository};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::Terminal;
use crate::cli::{Command, DeviceCommand, GlobalOpts, OperatorsCommand, ServerCommand};
use crate::lane;
use crate::output::{self, operator_error};

/// Commands that work without an operator session.
fn needs_session(command: &Command) -> bool {
    !matches!(
        command,
        Command::Pay { .. }
            | Command::Server(ServerCommand::Show)
            | Command::Device(DeviceCommand::Show)
    )
}

pub async fn dispatch(
    command: Command,
    mut terminal: Terminal,
    db: &Database,
    global: &GlobalOpts,
) -> Result<()> {
    if needs_session(&command) {
        login(&mut terminal, global).await?;
    }

    match command {
        Command::Login => {
            let capabilities = terminal.capabilities();
            let session = terminal.session().context("no session after login")?;
            if global.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "session": session,
                        "capabilities": capabilities,
                    }))?
                );
            } else {
                println!("{} ({})", session.display_name, session.role);
                println!(
                    "entrada: {}  salida: {}  mantenimiento: {}",
                    capabilities.entry, capabilities.exit, capabilities.maintenance
                );
            }
            Ok(())
        }

        Command::Enter { plate } => {
            let outcome = terminal
                .register_entry(&plate)
                .await
                .map_err(operator_error)?;
            output::entry(&outcome);
            Ok(())
        }

        Command::Exit { code, yes } => exit(&mut terminal, &code, yes).await,

        Command::Quote { code } => {
            match terminal.quote_fee(&code).await.map_err(operator_error)? {
                Some(quote) => {
                    println!("Tiempo:  {} min", quote.minutes);
                    println!("Importe: {} (informativo)", quote.amount);
                }
                None => println!("{}", DisplayMessages::VEHICLE_NOT_FOUND),
            }
            Ok(())
        }

        Command::Pay { code, cents } => pay(db, &code, cents).await,

        Command::Lane => lane::run(terminal).await,

        Command::Server(command) => server(command, &mut terminal, db, global).await,

        Command::Device(DeviceCommand::Show) => {
            let device = &terminal.config().device;
            if global.json {
                println!("{}", serde_json::to_string_pretty(device)?);
            } else {
                println!("Id:      {}", device.id);
                println!("Nombre:  {}", device.name);
                println!("Rol:     {}", device.role);
                println!("Numero:  {}", device.numeric_id);
            }
            Ok(())
        }

        Command::Device(DeviceCommand::Configure {
            name,
            role,
            numeric_id,
        }) => {
            let outcome = terminal
                .configure_device(&name, role, numeric_id)
                .await
                .map_err(operator_error)?;
            println!("{}", outcome.message);
            Ok(())
        }

        Command::Operators(OperatorsCommand::List) => {
            let operators = terminal.list_operators().await.map_err(operator_error)?;
            if global.json {
                println!("{}", serde_json::to_string_pretty(&operators)?);
            } else {
                output::operators(&operators);
            }
            Ok(())
        }

        Command::Operators(OperatorsCommand::Create {
            username,
            new_password,
            first_name,
            last_name,
            role,
        }) => {
            let request = NewOperator {
                username,
                password: new_password,
                first_name,
                last_name,
                role,
            };
            let outcome = terminal
                .create_operator(&request)
                .await
                .map_err(operator_error)?;
            if !outcome.is_created() {
                bail!(outcome.message);
            }
            println!("{}", outcome.message);
            Ok(())
        }
    }
}

async fn login(terminal: &mut Terminal, global: &GlobalOpts) -> Result<()> {
    let (Some(user), Some(password)) = (&global.user, &global.password) else {
        bail!(
            "{} (--user/--password or PARKGATE_USER/PARKGATE_PASSWORD)",
            DisplayMessages::CREDENTIALS_REQUIRED
        );
    };

    terminal
        .login(user, password)
        .await
        .map_err(operator_error)?;
    Ok(())
}

async fn exit(terminal: &mut Terminal, code: &str, yes: bool) -> Result<()> {
    let result = terminal.lookup_exit(code).await.map_err(operator_error)?;
    output::lookup(&result);

    if !matches!(result, ExitLookup::Ready(_)) {
        return Ok(());
    }

    if yes || confirm_prompt("Confirmar salida? [s/N] ").await? {
        let outcome = terminal.confirm_exit().await.map_err(operator_error)?;
        output::exit(&outcome);
    } else {
        terminal.cancel_exit().map_err(operator_error)?;
        println!("Salida cancelada");
    }
    Ok(())
}

async fn confirm_prompt(prompt: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;

    Ok(is_yes(&answer))
}

pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "y" | "yes"
    )
}

/// Stand-in for the pay station: marks the vehicle inside as paid.
async fn pay(db: &Database, code: &str, cents: i64) -> Result<()> {
    if cents < 0 {
        bail!("amount must not be negative");
    }

    let query = ExitQuery::parse(code)?;
    let rows = SqliteVehicleRepository::new(db.pool().clone())
        .record_payment(&query, Money::from_cents(cents), SystemClock.now())
        .await?;

    if rows == 0 {
        bail!(DisplayMessages::VEHICLE_NOT_FOUND);
    }
    println!("{query}: {} pagado", Money::from_cents(cents));
    Ok(())
}

async fn server(
    command: ServerCommand,
    terminal: &mut Terminal,
    db: &Database,
    global: &GlobalOpts,
) -> Result<()> {
    match command {
        ServerCommand::Show => {
            print_server(&terminal.config().server, global.json)?;
            Ok(())
        }

        ServerCommand::Set(args) => {
            let server = ServerConfig::from_input(
                &args.host,
                &args.port,
                &args.database,
                &args.db_user,
                &args.db_password,
            )
            .map_err(|e| anyhow!(e).context(DisplayMessages::INVALID_SERVER_CONFIG))?;
            terminal
                .save_server_config(server)
                .map_err(operator_error)?;
            println!("{}", DisplayMessages::CONFIG_SAVED);
            Ok(())
        }

        ServerCommand::Restore { save } => {
            let defaults = terminal.default_server_config().map_err(operator_error)?;
            print_server(&defaults, global.json)?;
            if save {
                terminal
                    .save_server_config(defaults)
                    .map_err(operator_error)?;
                println!("{}", DisplayMessages::CONFIG_SAVED);
            } else {
                println!("{}", DisplayMessages::DEFAULTS_RESTORED);
            }
            Ok(())
        }

        ServerCommand::Test => {
            let server = terminal.config().server.clone();
            let version = terminal
                .test_connection(&server, db)
                .await
                .map_err(operator_error)?;
            println!("{} -> {version}", server.endpoint());
            Ok(())
        }
    }
}

fn print_server(server: &ServerConfig, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "host": server.host,
                "port": server.port,
                "database": server.database,
                "username": server.username,
            }))?
        );
    } else {
        println!("Servidor: {}", server.endpoint());
        println!("Usuario:  {}", server.username);
    }
    Ok(())
}
