/// Profile document model
///
/// The unit of published data: profile fields, projects, and the activity
/// block, serialized as camelCase JSON. The same shape is uploaded to
/// content-addressed storage, mirrored to the server cache, and held as
/// the local draft.
pub mod media;
pub mod models;

pub use media::MediaRef;
pub use models::{
    Activity, BlogPost, Certificate, DraftPatch, ProfileDocument, Project, SocialLink,
    DEFAULT_ANIMATION, MAX_FEATURED_PROJECTS,
};
