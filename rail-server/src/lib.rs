//! Rail route server.
//!
//! A web service that answers: "Which lines and which timetabled runs can
//! take me from this station to that one?"

pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod planner;
pub mod web;
