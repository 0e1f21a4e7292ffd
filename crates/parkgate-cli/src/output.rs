//! Operator-facing rendering of attendant outcomes.

use parkgate_attendant::{
    AttendantError, EntryOutcome, ExitConfirmation, ExitLookup, ExitOutcome, PrintOutcome,
    ReprintOutcome,
};
use parkgate_hardware::Receipt;
use parkgate_storage::{DisplayMessages, Operator};

/// Screen message first, technical cause after.
pub fn operator_error(err: AttendantError) -> anyhow::Error {
    let message = err.display_message();
    anyhow::Error::new(err).context(message)
}

/// The simulated printer's paper is stdout.
fn print_ticket(receipt: &Receipt, copy: u32, printed: &PrintOutcome) {
    match printed {
        PrintOutcome::Printed => {
            println!("{}", receipt.render(copy));
            println!("{}", DisplayMessages::TICKET_PRINTED);
        }
        PrintOutcome::Fallback { text, reason } => {
            eprintln!("{} ({reason})", DisplayMessages::PRINTER_NOT_FOUND);
            println!("{text}");
        }
    }
}

fn gate_line(raised: bool) {
    if !raised {
        eprintln!("{}", DisplayMessages::GATE_FAILED);
    }
}

pub fn entry(outcome: &EntryOutcome) {
    print_ticket(&outcome.receipt, 1, &outcome.printed);
    gate_line(outcome.gate_raised);
    println!("{}", outcome.message());
}

pub fn reprint(outcome: &ReprintOutcome) {
    print_ticket(&outcome.receipt, outcome.copy, &outcome.printed);
    if !outcome.counted {
        eprintln!("copy {} not recorded on the server", outcome.copy);
    }
}

pub fn confirmation(confirmation: &ExitConfirmation) {
    println!("Placa:    {}", confirmation.plate());
    println!("Ticket:   {}", confirmation.ticket_id());
    println!(
        "Entrada:  {}",
        confirmation.entry_time().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Tiempo:   {}", confirmation.dwell());
    println!("Pagado:   {}", confirmation.amount());
}

pub fn lookup(result: &ExitLookup) {
    match result {
        ExitLookup::NotFound => println!("{}", DisplayMessages::VEHICLE_NOT_FOUND),
        ExitLookup::PaymentPending { plate, amount } => {
            println!("{} - {plate} ({amount})", DisplayMessages::PAYMENT_PENDING);
            println!("{}", DisplayMessages::GO_TO_PAYSTATION);
        }
        ExitLookup::Ready(ready) => confirmation(ready),
    }
}

pub fn exit(outcome: &ExitOutcome) {
    gate_line(outcome.gate_raised);
    println!("{} - {}", DisplayMessages::EXIT_REGISTERED, outcome.plate);
}

pub fn operators(operators: &[Operator]) {
    println!("{:<20} {:<30} {:<14} {}", "USUARIO", "NOMBRE", "ROL", "ACTIVO");
    for operator in operators {
        println!(
            "{:<20} {:<30} {:<14} {}",
            operator.username,
            operator.display_name(),
            operator.role,
            if operator.active { "si" } else { "no" }
        );
    }
}
