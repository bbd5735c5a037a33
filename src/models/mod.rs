//! Database row models

pub mod camera_gear;
pub mod consumable;
pub mod enums;
pub mod lab_equipment;
pub mod user;
