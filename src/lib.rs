//! Clinic Triage - conversational triage assistant for family-practice
//! appointment requests.
//!
//! A patient describes why they want an appointment; the assistant asks
//! clarifying questions through an LLM and ultimately emits one of four
//! fixed triage categories plus a rationale. Clinical judgment stays with a
//! human: the system only labels the request and suggests where to take it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
