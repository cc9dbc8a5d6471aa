//! `SeaORM` entity definitions, one collection per content type.

pub mod about;
pub mod competences;
pub mod contact_details;
pub mod contacts;
pub mod contents;
pub mod education_entries;
pub mod environments;
pub mod experience_entries;
pub mod gallery_images;
pub mod home_links;
pub mod home_text;
pub mod inquiries;
pub mod scripts;
pub mod skills;
pub mod strengths;
