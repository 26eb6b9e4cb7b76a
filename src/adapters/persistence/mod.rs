pub mod waitlist;

pub use waitlist::JsonFileWaitlistStore;
