pub mod device;
pub mod operator;
pub mod rate;
pub mod vehicle;

pub use device::{Device, DeviceRegistration, RegisterDeviceOutcome};
pub use operator::{CreateOperatorOutcome, NewOperator, Operator, OperatorValidation};
pub use rate::RateRow;
pub use vehicle::{ExitRecord, NewEntry, VehicleSession};
