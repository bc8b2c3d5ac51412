//! Entry points that tag a performer onto scenes, images or galleries.

use anyhow::Result;

use crate::models::{Gallery, GalleryId, Image, ImageId, Performer, PerformerId, Scene, SceneId};

use super::error::AutotagError;
use super::tagger::{MediaReader, TagSummary, Tagger};

/// Idempotent writes linking a performer to media records.
///
/// Each method returns `Ok(true)` when the link was created and `Ok(false)`
/// when it already existed.
pub trait PerformerRelationWriter {
    fn add_scene_performer(&self, scene: SceneId, performer: PerformerId) -> Result<bool>;

    fn add_image_performer(&self, image: ImageId, performer: PerformerId) -> Result<bool>;

    fn add_gallery_performer(&self, gallery: GalleryId, performer: PerformerId) -> Result<bool>;
}

/// Tags the performer onto every scene under `paths` whose path mentions it.
///
/// # Errors
///
/// See [`Tagger::tag_media`].
pub fn performer_scenes<C>(
    performer: &Performer,
    paths: &[String],
    catalog: &C,
    only_qualified: bool,
) -> Result<TagSummary, AutotagError>
where
    C: MediaReader<Scene> + PerformerRelationWriter + ?Sized,
{
    Tagger::new(performer).tag_media::<Scene, _, _>(paths, catalog, only_qualified, |p, s| {
        catalog.add_scene_performer(s, p)
    })
}

/// Tags the performer onto every image under `paths` whose path mentions it.
///
/// # Errors
///
/// See [`Tagger::tag_media`].
pub fn performer_images<C>(
    performer: &Performer,
    paths: &[String],
    catalog: &C,
    only_qualified: bool,
) -> Result<TagSummary, AutotagError>
where
    C: MediaReader<Image> + PerformerRelationWriter + ?Sized,
{
    Tagger::new(performer).tag_media::<Image, _, _>(paths, catalog, only_qualified, |p, i| {
        catalog.add_image_performer(i, p)
    })
}

/// Tags the performer onto every gallery under `paths` whose path mentions it.
///
/// # Errors
///
/// See [`Tagger::tag_media`].
pub fn performer_galleries<C>(
    performer: &Performer,
    paths: &[String],
    catalog: &C,
    only_qualified: bool,
) -> Result<TagSummary, AutotagError>
where
    C: MediaReader<Gallery> + PerformerRelationWriter + ?Sized,
{
    Tagger::new(performer).tag_media::<Gallery, _, _>(paths, catalog, only_qualified, |p, g| {
        catalog.add_gallery_performer(g, p)
    })
}
