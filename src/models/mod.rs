pub mod device;
pub mod device_info;
pub mod json;
pub mod level;
pub mod sensor;
pub mod sensor_info;
