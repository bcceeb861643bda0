//! Peripheral drivers, hardware initialisation, and task helpers.

pub mod button;
pub mod framebuffer;
pub mod hw_init;
pub mod indicator;
pub mod rails;
pub mod ssd1681;
pub mod task_pin;
