//! Interactive lane session.
//!
//! One operator, one terminal, one command per line. Errors are shown and the
//! session goes on, as on the attendant screen.

use anyhow::Result;
use parkgate_attendant::AttendantError;
use parkgate_storage::DisplayMessages;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::Terminal;
use crate::output;

const HELP: &str = "\
entrada <placa>          registrar entrada
salida <placa|ticket>    buscar vehiculo en salida
confirmar                registrar la salida pendiente
cancelar                 descartar la salida pendiente
reimprimir               reimprimir el ultimo ticket
tarifa <placa|ticket>    tarifa informativa
estado                   estado del terminal
ayuda                    esta ayuda
salir                    cerrar sesion";

#[derive(Debug, PartialEq, Eq)]
enum LaneCommand {
    Entry(String),
    Exit(String),
    Confirm,
    Cancel,
    Reprint,
    Quote(String),
    Status,
    Help,
    Quit,
}

/// `None` for an unknown command or a missing argument.
fn parse(line: &str) -> Option<LaneCommand> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let arg = rest.trim();
    let with_arg = |make: fn(String) -> LaneCommand| {
        (!arg.is_empty()).then(|| make(arg.to_string()))
    };

    match word.to_lowercase().as_str() {
        "entrada" | "e" => with_arg(LaneCommand::Entry),
        "salida" | "s" => with_arg(LaneCommand::Exit),
        "tarifa" | "t" => with_arg(LaneCommand::Quote),
        "confirmar" | "c" => Some(LaneCommand::Confirm),
        "cancelar" => Some(LaneCommand::Cancel),
        "reimprimir" | "r" => Some(LaneCommand::Reprint),
        "estado" => Some(LaneCommand::Status),
        "ayuda" | "?" => Some(LaneCommand::Help),
        "salir" | "q" => Some(LaneCommand::Quit),
        _ => None,
    }
}

fn show_error(err: &AttendantError) {
    eprintln!("{}", err.display_message());
    if err.is_connectivity() {
        eprintln!("  {err}");
    }
}

/// Run until `salir` or end of input. The operator is already logged in.
pub async fn run(mut terminal: Terminal) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("{HELP}");
    loop {
        stdout
            .write_all(format!("[{}]> ", terminal.state()).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse(&line) else {
            eprintln!("comando desconocido, escriba 'ayuda'");
            continue;
        };

        match command {
            LaneCommand::Entry(plate) => match terminal.register_entry(&plate).await {
                Ok(outcome) => output::entry(&outcome),
                Err(e) => show_error(&e),
            },
            LaneCommand::Exit(code) => match terminal.lookup_exit(&code).await {
                Ok(result) => output::lookup(&result),
                Err(e) => show_error(&e),
            },
            LaneCommand::Confirm => match terminal.confirm_exit().await {
                Ok(outcome) => output::exit(&outcome),
                Err(e) => show_error(&e),
            },
            LaneCommand::Cancel => {
                if let Err(e) = terminal.cancel_exit() {
                    show_error(&e);
                }
            }
            LaneCommand::Reprint => match terminal.reprint_last_ticket().await {
                Ok(outcome) => output::reprint(&outcome),
                Err(e) => show_error(&e),
            },
            LaneCommand::Quote(code) => match terminal.quote_fee(&code).await {
                Ok(Some(quote)) => {
                    println!("{} min, {} (informativo)", quote.minutes, quote.amount)
                }
                Ok(None) => println!("{}", DisplayMessages::VEHICLE_NOT_FOUND),
                Err(e) => show_error(&e),
            },
            LaneCommand::Status => {
                let capabilities = terminal.capabilities();
                if let Some(session) = terminal.session() {
                    println!("operador: {} ({})", session.display_name, session.role);
                }
                println!(
                    "dispositivo: {} [{}]",
                    terminal.config().device.name,
                    terminal.config().device.role
                );
                println!(
                    "entrada: {}  salida: {}  mantenimiento: {}",
                    capabilities.entry, capabilities.exit, capabilities.maintenance
                );
                if let Some(pending) = terminal.pending_exit() {
                    output::confirmation(pending);
                }
            }
            LaneCommand::Help => println!("{HELP}"),
            LaneCommand::Quit => break,
        }
    }

    terminal.logout();
    info!("lane session closed");
    Ok(())
}
