//! Application layer: curriculum standards and cross-standard mapping
//!
//! This layer turns raw definition payloads into domain trees and depends on
//! I/O boundary traits only.

pub mod curriculum;
pub mod error;
pub mod error_ext;
pub mod mapper;

pub use curriculum::{
    AnyCurriculum, ClassificationSystemCurriculum, Curriculum, CurriculumContext,
    EducaCurriculum, Lp21Curriculum, MapsTerms, PerCurriculum, TermSource,
};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::FetchResultExt;
pub use mapper::CrossStandardMapper;
