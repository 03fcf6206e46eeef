/// Company entity module
pub mod company;
/// Company member entity module
pub mod company_member;
/// Document entity module
pub mod document;
/// User entity module
pub mod user;

pub use company::Entity as Company;
pub use company_member::Entity as CompanyMember;
pub use document::Entity as Document;
pub use user::Entity as User;
