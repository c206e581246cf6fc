//! These models represent the values passed between the chat workspace, the gateway
//! and the engine adapter
//!
//! The same shapes travel over several boundaries:
//! - the workspace sends a [`input::UnifiedInput`] to the gateway
//! - the engine produces [`event::EngineEvent`]s for a request and its session context
//! - the gateway relays them as [`event::GatewayEvent`]s, which is also the JSON wire
//!   format the gateway server streams to browser clients
//!
//! The wire format keeps the tag names the browser workspace already understands
//! (`PHASE_UPDATE`, `STREAM_CHUNK`, ...), so the serde attributes on these types are
//! part of the contract.
pub mod context;
pub mod event;
pub mod input;
pub mod message;
