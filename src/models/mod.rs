pub mod appointment;
pub mod message;
pub mod persona;
pub mod progress;
pub mod promotion;
pub mod salon_config;
pub mod service;

pub use appointment::{Appointment, AppointmentStatus};
pub use message::{ChatMessage, GroundingLink, Role};
pub use persona::Persona;
pub use progress::{BookingProgress, BookingStage};
pub use promotion::{Promotion, PromotionType};
pub use salon_config::{ConfigEdit, SalonConfig};
pub use service::{Service, ServiceCategory, ServiceGroup};
