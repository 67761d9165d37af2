//! Typed CRUD surface over the conference directory entities.
//!
//! Each entity gets a statically-typed descriptor (schema, route path,
//! permission key) and a uniform router; access checks resolve through a
//! capability table over sum types rather than runtime string lookup.

pub mod descriptor;
pub mod policy;
pub mod router;

pub use descriptor::{
    CommitteeEntity, CommitteeRecord, ConferenceEntity, ConferenceRecord, DelegationEntity,
    DelegationRecord, EntityDescriptor, PaperDirectoryEntity, PaperDirectoryRecord,
    ParticipantEntity, ParticipantRecord,
};
pub use policy::{AccessPolicy, ActorRole, CrudAction, EntityKind};
pub use router::{crud_router, EntityStore, StoreError};
