pub mod gift_ideas;
pub mod reminders;
