// HTTP handlers

pub mod teams;
