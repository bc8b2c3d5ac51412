//! Integration tests for the auto-tagging workflow.
//!
//! These tests drive the public API end to end against an in-memory
//! catalog: register performers and media, then match and tag.

use anyhow::Result;
use autotag::autotagger::{
    AutotagError, PerformerRelationWriter, Tagger, get_matching_performers, performer_galleries, performer_images,
    performer_scenes,
};
use autotag::{AutotagConfig, CatalogService, Database, Scene, SceneId};

fn catalog() -> Result<CatalogService> {
    Ok(CatalogService::new(Database::in_memory()?))
}

#[test]
fn test_full_library_pass_tags_every_media_kind() -> Result<()> {
    // Arrange
    let service = catalog()?;
    let jane = service.create_performer("Jane Doe", Some("JD Smith, Janie"))?;
    let scene = service.create_scene("/library/Jane Doe - Sunset.mp4", None)?;
    let image = service.create_image("/library/photos/jd_smith_001.jpg", None)?;
    let gallery = service.create_gallery("/library/sets/jane.doe.set1", Some("Set 1"))?;
    let untouched = service.create_scene("/library/janie/behind.mp4", None)?;
    let config = AutotagConfig::default();

    // Act
    let scenes = performer_scenes(&jane, &[], &service, config.only_qualified_performers)?;
    let images = performer_images(&jane, &[], &service, config.only_qualified_performers)?;
    let galleries = performer_galleries(&jane, &[], &service, config.only_qualified_performers)?;

    // Assert
    assert_eq!(scenes.added, 1);
    assert_eq!(images.added, 1);
    assert_eq!(galleries.added, 1);
    assert_eq!(service.scene_performers(scene.id())?, vec![jane.id()]);
    assert_eq!(service.image_performers(image.id())?, vec![jane.id()]);
    assert_eq!(service.gallery_performers(gallery.id())?, vec![jane.id()]);
    assert!(
        service.scene_performers(untouched.id())?.is_empty(),
        "unqualified alias 'Janie' must not tag when only qualified names are allowed"
    );

    Ok(())
}

#[test]
fn test_repeated_tagging_never_duplicates_relations() -> Result<()> {
    let service = catalog()?;
    let jane = service.create_performer("Jane Doe", None)?;
    let scene = service.create_scene("/library/jane_doe.mp4", None)?;

    let first = performer_scenes(&jane, &[], &service, true)?;
    let second = performer_scenes(&jane, &[], &service, true)?;

    assert_eq!(first.added, 1);
    assert_eq!(second.added, 0, "second pass should be a no-op");
    assert_eq!(service.scene_performers(scene.id())?.len(), 1);

    let count: i64 = service.database().connection().query_row(
        "SELECT COUNT(*) FROM performers_scenes",
        [],
        |row| row.get(0),
    )?;
    assert_eq!(count, 1);

    Ok(())
}

#[test]
fn test_matching_respects_qualification_gate() -> Result<()> {
    let service = catalog()?;
    let jane = service.create_performer("Jane Doe", None)?;
    let jo = service.create_performer("Jo", None)?;
    let path = "/library/Jo/jane_doe-interview.mp4";

    let strict = get_matching_performers(path, &service, true)?;
    let loose = get_matching_performers(path, &service, false)?;

    assert_eq!(strict, vec![jane.clone()]);
    assert_eq!(loose, vec![jane, jo]);

    Ok(())
}

#[test]
fn test_partial_failure_reports_exactly_the_failed_pair() -> Result<()> {
    let service = catalog()?;
    let jane = service.create_performer("Jane Doe", None)?;
    for i in 1..=5 {
        service.create_scene(&format!("/library/jane doe {i}.mp4"), None)?;
    }
    let failing = SceneId::new(3);
    let mut attempted = Vec::new();

    let result = Tagger::new(&jane).tag_media::<Scene, _, _>(&[], &service, true, |p, s| {
        attempted.push(s);
        if s == failing {
            anyhow::bail!("simulated write failure");
        }
        service.add_scene_performer(s, p)
    });

    assert_eq!(attempted.len(), 5, "every pair should still be attempted");
    match result {
        Err(AutotagError::Relations(failures)) => {
            assert_eq!(failures.len(), 1);
            assert!(failures[0].to_string().contains("simulated write failure"));
        }
        other => panic!("expected relation failures, got {other:?}"),
    }
    assert!(service.scene_performers(failing)?.is_empty());
    assert_eq!(service.scene_performers(SceneId::new(5))?, vec![jane.id()]);

    Ok(())
}

#[test]
fn test_path_prefixes_scope_the_pass() -> Result<()> {
    let service = catalog()?;
    let jane = service.create_performer("Jane Doe", None)?;
    let inside = service.create_scene("/library/new/jane-doe.mp4", None)?;
    let outside = service.create_scene("/archive/jane-doe.mp4", None)?;

    let summary = performer_scenes(&jane, &["/library/new".to_string()], &service, true)?;

    assert_eq!(summary.matched, 1);
    assert_eq!(service.scene_performers(inside.id())?, vec![jane.id()]);
    assert!(service.scene_performers(outside.id())?.is_empty());

    Ok(())
}

#[test]
fn test_on_disk_catalog_persists_relations() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("catalog.db");

    {
        let service = CatalogService::new(Database::open(&db_path)?);
        let jane = service.create_performer("Jane Doe", None)?;
        service.create_scene("/library/jane_doe.mp4", None)?;
        performer_scenes(&jane, &[], &service, true)?;
    }

    let service = CatalogService::new(Database::open(&db_path)?);
    let jane = service
        .list_performers()?
        .into_iter()
        .next()
        .expect("performer should persist");
    let summary = performer_scenes(&jane, &[], &service, true)?;
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.added, 0);

    Ok(())
}
