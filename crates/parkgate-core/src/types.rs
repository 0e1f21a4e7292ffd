use crate::{
    Result,
    constants::{
        DEVICE_ID_PREFIX, DEVICE_ID_SUFFIX_LEN, ENTRY_DEVICE_NUMBER, EXIT_DEVICE_NUMBER,
        MIN_PLATE_LENGTH, TICKET_PREFIX,
    },
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle license plate, normalized to trimmed uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Plate(String);

impl Plate {
    /// Create a plate with validation.
    ///
    /// The input is normalized (trimmed and converted to uppercase) before validation.
    ///
    /// # Errors
    /// Returns `Error::EmptyPlate` for blank input and `Error::PlateTooShort` when
    /// the normalized plate has fewer than [`MIN_PLATE_LENGTH`] characters.
    pub fn new(plate: &str) -> Result<Self> {
        let plate = plate.trim().to_uppercase();

        if plate.is_empty() {
            return Err(Error::EmptyPlate);
        }

        if plate.chars().count() < MIN_PLATE_LENGTH {
            return Err(Error::PlateTooShort {
                plate,
                min: MIN_PLATE_LENGTH,
            });
        }

        Ok(Plate(plate))
    }

    /// Get the plate as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Plate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Plate::new(s)
    }
}

impl TryFrom<String> for Plate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Plate::new(&value)
    }
}

impl From<Plate> for String {
    fn from(plate: Plate) -> Self {
        plate.0
    }
}

/// Ticket identifier printed on entry (`PK-<token>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    /// Parse a ticket id, accepting the prefix in any case.
    ///
    /// # Errors
    /// Returns `Error::InvalidTicketId` if the prefix is missing or the token
    /// after it is empty or contains whitespace or non-ASCII characters.
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim().to_uppercase();

        let Some(token) = code.strip_prefix(TICKET_PREFIX) else {
            return Err(Error::InvalidTicketId(format!(
                "'{code}' does not start with {TICKET_PREFIX}"
            )));
        };

        if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidTicketId(format!(
                "'{code}' has an invalid token"
            )));
        }

        Ok(TicketId(code))
    }

    /// Build a ticket id from a numeric token.
    #[must_use]
    pub fn from_token(token: u64) -> Self {
        TicketId(format!("{TICKET_PREFIX}{token}"))
    }

    /// Returns `true` if the scanned code looks like a ticket id.
    #[must_use]
    pub fn looks_like_ticket(code: &str) -> bool {
        code.trim()
            .get(..TICKET_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TICKET_PREFIX))
    }

    /// Get the ticket id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TicketId::new(s)
    }
}

impl TryFrom<String> for TicketId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        TicketId::new(&value)
    }
}

impl From<TicketId> for String {
    fn from(ticket: TicketId) -> Self {
        ticket.0
    }
}

/// What the operator typed or scanned at the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitQuery {
    Plate(Plate),
    Ticket(TicketId),
}

impl ExitQuery {
    /// Classify an exit input.
    ///
    /// Codes starting with `PK-` are ticket lookups; everything else goes
    /// through plate validation.
    ///
    /// # Errors
    /// Returns the plate or ticket validation error of the chosen branch.
    pub fn parse(input: &str) -> Result<Self> {
        if TicketId::looks_like_ticket(input) {
            Ok(ExitQuery::Ticket(TicketId::new(input)?))
        } else {
            Ok(ExitQuery::Plate(Plate::new(input)?))
        }
    }
}

impl fmt::Display for ExitQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExitQuery::Plate(plate) => write!(f, "plate {plate}"),
            ExitQuery::Ticket(ticket) => write!(f, "ticket {ticket}"),
        }
    }
}

/// Role a terminal is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceRole {
    /// Entry-only terminal.
    Entrada,
    /// Exit-only terminal.
    Salida,
    /// Handles both entries and exits.
    #[default]
    Mixto,
}

impl DeviceRole {
    /// Returns `true` if the terminal may register entries.
    #[inline]
    #[must_use]
    pub fn can_register_entry(self) -> bool {
        matches!(self, DeviceRole::Entrada | DeviceRole::Mixto)
    }

    /// Returns `true` if the terminal may register exits.
    #[inline]
    #[must_use]
    pub fn can_register_exit(self) -> bool {
        matches!(self, DeviceRole::Salida | DeviceRole::Mixto)
    }

    /// Device number recorded on entries, `0` when entries are not allowed.
    #[must_use]
    pub fn entry_device_number(self) -> i32 {
        if self.can_register_entry() {
            ENTRY_DEVICE_NUMBER
        } else {
            0
        }
    }

    /// Device number recorded on exits, `0` when exits are not allowed.
    #[must_use]
    pub fn exit_device_number(self) -> i32 {
        if self.can_register_exit() {
            EXIT_DEVICE_NUMBER
        } else {
            0
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceRole::Entrada => "ENTRADA",
            DeviceRole::Salida => "SALIDA",
            DeviceRole::Mixto => "MIXTO",
        }
    }
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ENTRADA" => Ok(DeviceRole::Entrada),
            "SALIDA" => Ok(DeviceRole::Salida),
            "MIXTO" => Ok(DeviceRole::Mixto),
            other => Err(Error::InvalidDeviceRole(other.to_string())),
        }
    }
}

/// Operator account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperatorRole {
    Administrador,
    Operador,
    Caja,
}

impl OperatorRole {
    /// Only administrators reach the maintenance area.
    #[must_use]
    pub fn can_access_maintenance(self) -> bool {
        matches!(self, OperatorRole::Administrador)
    }

    /// Every role may register entries.
    #[must_use]
    pub fn can_access_entry(self) -> bool {
        true
    }

    /// Every role may register exits.
    #[must_use]
    pub fn can_access_exit(self) -> bool {
        true
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OperatorRole::Administrador => "ADMINISTRADOR",
            OperatorRole::Operador => "OPERADOR",
            OperatorRole::Caja => "CAJA",
        }
    }
}

impl fmt::Display for OperatorRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ADMINISTRADOR" => Ok(OperatorRole::Administrador),
            "OPERADOR" => Ok(OperatorRole::Operador),
            "CAJA" => Ok(OperatorRole::Caja),
            other => Err(Error::InvalidOperatorRole(other.to_string())),
        }
    }
}

/// Where a vehicle session stands in the lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LotState {
    Inside,
    Exited,
}

impl LotState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LotState::Inside => "INSIDE",
            LotState::Exited => "EXITED",
        }
    }
}

impl fmt::Display for LotState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LotState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "INSIDE" => Ok(LotState::Inside),
            "EXITED" => Ok(LotState::Exited),
            other => Err(Error::InvalidLotState(other.to_string())),
        }
    }
}

/// Amount of money in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

/// Locally generated terminal identifier (`POS-XXXXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Generate a fresh identifier from a random UUID.
    #[must_use]
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        let suffix = &hex[hex.len() - DEVICE_ID_SUFFIX_LEN..];
        DeviceId(format!("{DEVICE_ID_PREFIX}{suffix}"))
    }

    /// Wrap an existing identifier.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if the identifier is blank.
    pub fn new(id: &str) -> Result<Self> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidConfig {
                field: "device.id",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(DeviceId(id.to_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DeviceId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        DeviceId::new(&value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}
