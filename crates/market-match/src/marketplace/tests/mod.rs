mod common;
mod contacts;
mod dashboard;
mod listing;
