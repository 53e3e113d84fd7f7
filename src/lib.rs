//! Attendance and payroll engine for restaurant staff operations.
//!
//! This crate provides the core of a staff-operations console: the
//! clock-in/break/clock-out state machine, pure time aggregation, payroll
//! computation over approved attendance, and the approval workflows for
//! attendance records and shift requests. It exposes only in-process
//! interfaces; rendering, persistence and user management belong to
//! collaborators.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod models;
pub mod policy;
pub mod requests;
pub mod store;
pub mod timesheet;
pub mod tracker;
