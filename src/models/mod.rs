pub mod discord;
pub mod owm_onecall;
pub mod snapshot;
