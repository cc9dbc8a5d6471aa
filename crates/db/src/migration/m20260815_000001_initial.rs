//! Initial schema: one collection per content type.
//!
//! Media attachments persist as a (url, key) column pair for single-valued
//! fields and a JSONB array of {url, key} objects for multi-valued ones.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS
                about, competences, contacts, contact_details, contents,
                environments, education_entries, experience_entries,
                gallery_images, home_text, home_links, inquiries,
                scripts, skills, strengths
             CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- About page (singleton: at most one live row)
CREATE TABLE about (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    subheading TEXT NOT NULL,
    description TEXT NOT NULL,
    purple_text TEXT NOT NULL,
    image_url TEXT,
    image_key TEXT,
    pdf_url TEXT,
    pdf_key TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Competence cards
CREATE TABLE competences (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title TEXT NOT NULL,
    image_url TEXT,
    image_key TEXT
);

-- Contact cards (social links with optional logo)
CREATE TABLE contacts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    heading TEXT NOT NULL,
    contact_url TEXT NOT NULL,
    logo_url TEXT,
    logo_key TEXT
);

-- Site-wide contact details (singleton)
CREATE TABLE contact_details (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    phone_number TEXT NOT NULL,
    main_id TEXT NOT NULL
);

-- Content posts (main image + image/video collections)
CREATE TABLE contents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    main_image_url TEXT,
    main_image_key TEXT,
    images JSONB NOT NULL DEFAULT '[]'::jsonb,
    videos JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Environment posts
CREATE TABLE environments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    main_image_url TEXT,
    main_image_key TEXT,
    images JSONB NOT NULL DEFAULT '[]'::jsonb,
    videos JSONB NOT NULL DEFAULT '[]'::jsonb
);

-- Education entries
CREATE TABLE education_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    degree TEXT NOT NULL,
    school TEXT NOT NULL,
    year TEXT NOT NULL,
    percentage TEXT NOT NULL
);

-- Work experience entries
CREATE TABLE experience_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    position TEXT NOT NULL,
    company TEXT NOT NULL,
    years TEXT NOT NULL,
    description TEXT NOT NULL
);

-- Capped image gallery (cap enforced in the application)
CREATE TABLE gallery_images (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    filename TEXT NOT NULL,
    image_url TEXT NOT NULL,
    image_key TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Home-page big text (singleton)
CREATE TABLE home_text (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    text TEXT NOT NULL
);

-- Home-page links (singleton)
CREATE TABLE home_links (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    general_title TEXT NOT NULL,
    general_url TEXT NOT NULL,
    insta_title TEXT NOT NULL,
    insta_url TEXT NOT NULL
);

-- Visitor inquiries from the contact form
CREATE TABLE inquiries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    inquiry_type TEXT,
    budget TEXT,
    message TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Index for newest-first inquiry listing
CREATE INDEX idx_inquiries_created ON inquiries(created_at DESC);

-- Scripts (image + PDF pair, both required)
CREATE TABLE scripts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    image_url TEXT NOT NULL,
    image_key TEXT NOT NULL,
    pdf_url TEXT NOT NULL,
    pdf_key TEXT NOT NULL
);

-- Skill bars
CREATE TABLE skills (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    percentage INT NOT NULL CHECK (percentage BETWEEN 0 AND 100)
);

-- Strength bars
CREATE TABLE strengths (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL,
    percentage INT NOT NULL CHECK (percentage BETWEEN 0 AND 100)
);
";
