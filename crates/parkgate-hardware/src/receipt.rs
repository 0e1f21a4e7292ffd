//! Entry receipt and its plain-text layout.
//!
//! The same text is sent to the printer and shown on screen when printing
//! fails, so the customer-facing content never depends on the device.

use chrono::{DateTime, Local, TimeZone, Utc};
use parkgate_core::{Plate, TicketId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

const RULE: &str = "========================";

/// Data printed on an entry ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub ticket_id: TicketId,
    pub plate: Plate,
    pub entry_time: DateTime<Utc>,
}

impl Receipt {
    pub fn new(ticket_id: TicketId, plate: Plate, entry_time: DateTime<Utc>) -> Self {
        Self {
            ticket_id,
            plate,
            entry_time,
        }
    }

    /// Render the receipt in the terminal's local time zone.
    #[must_use]
    pub fn render(&self, copy: u32) -> String {
        self.render_in(&Local, copy)
    }

    /// Render the receipt with dates shown in `tz`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use parkgate_core::{Plate, TicketId};
    /// use parkgate_hardware::Receipt;
    ///
    /// let receipt = Receipt::new(
    ///     TicketId::from_token(1736928000000),
    ///     Plate::new("abc123").unwrap(),
    ///     Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap(),
    /// );
    ///
    /// let text = receipt.render_in(&Utc, 1);
    /// assert!(text.contains("PLACA: ABC123"));
    /// assert!(text.contains("FECHA: 15/01/2025"));
    /// assert!(text.contains("ID: PK-1736928000000"));
    /// ```
    #[must_use]
    pub fn render_in<Tz>(&self, tz: &Tz, copy: u32) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let local = self.entry_time.with_timezone(tz);
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "SISTEMA DE PARQUEO");
        let _ = writeln!(out, "TICKET DE INGRESO");
        if copy > 1 {
            let _ = writeln!(out, "COPIA #{copy}");
        }
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", barcode_art(self.plate.as_str()));
        let _ = writeln!(out);
        let _ = writeln!(out, "PLACA: {}", self.plate);
        let _ = writeln!(out);
        let _ = writeln!(out, "FECHA: {}", local.format("%d/%m/%Y"));
        let _ = writeln!(out, "HORA:  {}", local.format("%H:%M:%S"));
        let _ = writeln!(out);
        let _ = writeln!(out, "ID: {}", self.ticket_id);
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "CONSERVE ESTE TICKET");
        let _ = writeln!(out, "PARA SU SALIDA");
        let _ = write!(out, "{RULE}");

        out
    }
}

/// Visual bar pattern for a plate: 3 to 7 bars per character, the plate
/// spelled out underneath and a closing rule.
#[must_use]
pub fn barcode_art(plate: &str) -> String {
    let mut bars = String::from("  ");
    let mut letters = String::from("  ");

    for c in plate.chars() {
        let width = (u32::from(c) % 5 + 3) as usize;
        bars.push_str(&"|".repeat(width));
        bars.push(' ');
        letters.push(' ');
        letters.push(c);
        letters.push(' ');
    }

    let rule = "-".repeat(plate.chars().count() * 3);
    format!("  CODIGO DE VEHICULO:\n\n{bars}\n{letters}\n  {rule}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn receipt() -> Receipt {
        Receipt::new(
            TicketId::from_token(1_736_928_000_000),
            Plate::new("ABC123").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 15, 8, 5, 9).unwrap(),
        )
    }

    #[test]
    fn test_render_layout() {
        let text = receipt().render_in(&Utc, 1);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "SISTEMA DE PARQUEO");
        assert_eq!(lines[1], "TICKET DE INGRESO");
        assert_eq!(lines[2], RULE);
        assert!(lines.contains(&"PLACA: ABC123"));
        assert!(lines.contains(&"FECHA: 15/01/2025"));
        assert!(lines.contains(&"HORA:  08:05:09"));
        assert!(lines.contains(&"ID: PK-1736928000000"));
        assert_eq!(lines[lines.len() - 3], "CONSERVE ESTE TICKET");
        assert_eq!(lines[lines.len() - 2], "PARA SU SALIDA");
        assert!(!text.contains("COPIA"));
    }

    #[rstest]
    #[case(2)]
    #[case(5)]
    fn test_reprint_adds_copy_marker(#[case] copy: u32) {
        let receipt = receipt();
        let original = receipt.render_in(&Utc, 1);
        let reprint = receipt.render_in(&Utc, copy);

        assert!(reprint.contains(&format!("COPIA #{copy}")));
        // Everything else is unchanged.
        assert_eq!(reprint.replace(&format!("COPIA #{copy}\n"), ""), original);
    }

    #[test]
    fn test_barcode_art_widths() {
        // 'A' = 65 -> 65 % 5 + 3 = 3 bars, 'B' = 66 -> 4 bars
        let art = barcode_art("AB");
        let lines: Vec<&str> = art.lines().collect();

        assert_eq!(lines[0], "  CODIGO DE VEHICULO:");
        assert_eq!(lines[2], "  ||| |||| ");
        assert_eq!(lines[3], "   A  B ");
        assert_eq!(lines[4], "  ------");
    }

    #[test]
    fn test_barcode_art_bar_range() {
        let art = barcode_art("ABC123XYZ");
        let bars = art.lines().nth(2).unwrap();
        for group in bars.split_whitespace() {
            assert!((3..=7).contains(&group.len()));
        }
    }
}
