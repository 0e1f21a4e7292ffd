pub mod device;
pub mod operator;
pub mod vehicle;

pub use device::{DeviceRepository, SqliteDeviceRepository};
pub use operator::{OperatorRepository, SqliteOperatorRepository};
pub use vehicle::{SqliteVehicleRepository, VehicleRepository};
