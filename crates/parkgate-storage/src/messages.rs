//! Operator-facing messages.
//!
//! Messages are shown on the terminal screen and returned by the backend in
//! its `message` columns, so both sides agree on the wording. They are in
//! Spanish, the language of the lot staff.
//!
//! # Usage
//!
//! ```
//! use parkgate_storage::messages::DisplayMessages;
//!
//! assert_eq!(DisplayMessages::OPERATOR_INACTIVE, "Usuario inactivo");
//! ```

/// Display messages (Spanish, ASCII only).
///
/// Accents are left out so every message renders on the thermal printer's
/// built-in code page as well as on screen.
pub struct DisplayMessages;

impl DisplayMessages {
    // Plate input

    /// Blank plate.
    pub const PLATE_REQUIRED: &'static str = "Ingrese la placa";

    /// Plate shorter than the minimum length.
    pub const PLATE_INVALID: &'static str = "Placa invalida";

    /// Scanned code looked like a ticket but was malformed.
    pub const TICKET_INVALID: &'static str = "Codigo de ticket invalido";

    // Entry and exit

    pub const ENTRY_REGISTERED: &'static str = "Entrada registrada correctamente";

    /// Entry saved only locally; the ticket was still issued.
    pub const ENTRY_NOT_SAVED: &'static str = "Ticket emitido sin registro en servidor";

    pub const EXIT_REGISTERED: &'static str = "Salida registrada correctamente";

    /// No INSIDE session for the plate or ticket.
    pub const VEHICLE_NOT_FOUND: &'static str = "No se encontro el vehiculo en el sistema";

    /// Session exists but the pay station has not marked it paid.
    pub const PAYMENT_PENDING: &'static str = "PAGO PENDIENTE";

    /// Follow-up to [`Self::PAYMENT_PENDING`].
    pub const GO_TO_PAYSTATION: &'static str = "El cliente debe ir a PayStation a pagar";

    pub const NO_TICKET_TO_REPRINT: &'static str = "No hay ticket para reimprimir";

    pub const TICKET_PRINTED: &'static str = "Ticket impreso";

    pub const PRINTER_NOT_FOUND: &'static str = "Impresora no encontrada";

    pub const GATE_FAILED: &'static str = "No se pudo levantar la pluma";

    /// Confirm or cancel pressed without a vehicle ready to leave.
    pub const NO_PENDING_EXIT: &'static str = "No hay salida pendiente";

    // Device role

    pub const ENTRY_NOT_ALLOWED: &'static str = "Dispositivo no habilitado para entradas";

    pub const EXIT_NOT_ALLOWED: &'static str = "Dispositivo no habilitado para salidas";

    // Operators

    pub const CREDENTIALS_REQUIRED: &'static str = "Ingrese usuario y contrasena";

    pub const INVALID_CREDENTIALS: &'static str = "Usuario o contrasena incorrectos";

    pub const OPERATOR_INACTIVE: &'static str = "Usuario inactivo";

    pub const OPERATOR_CREATED: &'static str = "Operador creado correctamente";

    pub const OPERATOR_EXISTS: &'static str = "El nombre de usuario ya existe";

    pub const MAINTENANCE_DENIED: &'static str = "Acceso restringido a administradores";

    pub const NOT_LOGGED_IN: &'static str = "Inicie sesion primero";

    // Maintenance

    pub const FIELDS_REQUIRED: &'static str = "Complete todos los campos";

    pub const DEVICE_NAME_REQUIRED: &'static str = "Ingrese el nombre del dispositivo";

    pub const DEVICE_REGISTERED: &'static str = "Dispositivo registrado correctamente";

    pub const DEVICE_UPDATED: &'static str = "Dispositivo actualizado correctamente";

    /// Host, port, database or user failed validation.
    pub const INVALID_SERVER_CONFIG: &'static str = "Datos del servidor invalidos";

    pub const CONFIG_SAVED: &'static str = "Configuracion guardada correctamente";

    pub const DEFAULTS_RESTORED: &'static str = "Valores restaurados (no guardados)";

    // Connectivity

    pub const DB_UNREACHABLE: &'static str = "No se pudo conectar a la base de datos";

    /// Another action is still running on this terminal.
    pub const BUSY: &'static str = "Operacion en curso, espere";
}
