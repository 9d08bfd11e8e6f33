/*!
 * Command implementations
 */

pub mod account;
pub mod show;
