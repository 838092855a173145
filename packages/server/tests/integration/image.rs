use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use recipe_server::repository::RecipeRepository;
use recipe_server::services::ImageService;
use tokio::io::{AsyncRead, AsyncWriteExt, DuplexStream, ReadBuf};
use tokio::sync::oneshot;

use crate::common::{TestApp, routes};

/// Upload source that reports when it is first read, i.e. once the recipe
/// has been looked up and the bytes are being streamed in.
struct ReadStarted {
    inner: DuplexStream,
    started: Option<oneshot::Sender<()>>,
}

impl AsyncRead for ReadStarted {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if let Some(started) = self.started.take() {
            let _ = started.send(());
        }
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

mod image_upload {
    use super::*;

    #[tokio::test]
    async fn upload_stores_every_byte_and_redirects_to_recipe() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Image Recipe").await;
        let content = b"fake image content stream here".to_vec();

        let res = app.upload_image(id, content.clone()).await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location(), routes::show(id));

        let stored = app.state.recipes.find_by_id(id).await.unwrap().unwrap();
        let image = stored.image.expect("image should be stored");
        assert_eq!(image.len(), content.len());
        assert_eq!(image, content);
    }

    #[tokio::test]
    async fn second_upload_replaces_first() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Replace Image").await;

        app.upload_image(id, b"first upload, longer".to_vec()).await;
        app.upload_image(id, b"second".to_vec()).await;

        let res = app.get(&routes::recipe_image(id)).await;
        assert_eq!(res.bytes, b"second");
    }

    #[tokio::test]
    async fn upload_keeps_rest_of_recipe() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Keep Fields").await;
        app.add_ingredient(id, "salt", "1", None).await;

        app.upload_image(id, vec![0xFF, 0xD8, 0xFF]).await;

        let recipe = app.state.recipes.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(recipe.description, "Keep Fields");
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(
            recipe.notes.unwrap().recipe_notes,
            "Tastes better the next day."
        );
    }

    #[tokio::test]
    async fn edits_made_while_upload_streams_are_kept() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Slow Upload").await;
        let (inner, mut writer) = tokio::io::duplex(1024);
        let (started_tx, started_rx) = oneshot::channel();
        let source = ReadStarted {
            inner,
            started: Some(started_tx),
        };

        let service = ImageService::new(&*app.state.recipes);
        let (uploaded, ingredient_id) = tokio::join!(service.save_image_file(id, source), async {
            started_rx.await.unwrap();

            let ingredient_id = app.add_ingredient(id, "lime juice", "1", None).await;
            let id_field = id.to_string();
            app.create_recipe_with(&[
                ("id", id_field.as_str()),
                ("description", "Slow Upload"),
                ("notes", "Edited mid-upload."),
            ])
            .await;

            writer.write_all(b"streamed image").await.unwrap();
            drop(writer);
            ingredient_id
        });
        uploaded.unwrap();

        let recipe = app.state.recipes.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(recipe.image.as_deref(), Some(&b"streamed image"[..]));
        let ids: Vec<Option<i32>> = recipe.ingredients.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![Some(ingredient_id)]);
        assert_eq!(recipe.notes.unwrap().recipe_notes, "Edited mid-upload.");
    }

    #[tokio::test]
    async fn upload_to_unknown_recipe_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.upload_image(999, b"orphan".to_vec()).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.view(), Some("404error"));
    }

    #[tokio::test]
    async fn upload_without_image_field_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("No Field").await;

        let res = app.upload_part(id, "attachment", b"data".to_vec()).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.view(), Some("400error"));
        let recipe = app.state.recipes.find_by_id(id).await.unwrap().unwrap();
        assert!(recipe.image.is_none());
    }

    #[tokio::test]
    async fn upload_over_configured_limit_is_rejected() {
        let app = TestApp::spawn_with(|c| c.server.max_upload_bytes = 1024).await;
        let id = app.create_recipe("Too Big").await;

        let res = app.upload_image(id, vec![7u8; 8 * 1024]).await;

        assert!(matches!(res.status, 400 | 413), "status was {}", res.status);
        let recipe = app.state.recipes.find_by_id(id).await.unwrap().unwrap();
        assert!(recipe.image.is_none());
    }

    #[tokio::test]
    async fn upload_form_renders_for_existing_recipe() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Form Recipe").await;

        let res = app.get(&routes::image_form(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.view(), Some("recipe/imageuploadform"));
        assert!(res.text.contains(r#"name="imagefile""#));
        assert!(res.text.contains(r#"enctype="multipart/form-data""#));
    }
}

mod image_retrieval {
    use super::*;

    #[tokio::test]
    async fn recipe_without_image_returns_empty_body() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("No Image").await;

        let res = app.get(&routes::recipe_image(id)).await;

        assert_eq!(res.status, 200);
        assert!(res.bytes.is_empty());
        assert!(res.header("content-type").is_none());
    }

    #[tokio::test]
    async fn stored_image_is_returned_verbatim() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("With Image").await;
        let content = b"fake image text".to_vec();
        app.upload_image(id, content.clone()).await;

        let res = app.get(&routes::recipe_image(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.bytes.len(), content.len());
        assert_eq!(res.bytes, content);
        assert_eq!(res.header("content-type"), Some("image/jpeg"));
        assert_eq!(
            res.header("content-length"),
            Some(content.len().to_string().as_str())
        );
    }

    #[tokio::test]
    async fn binary_content_survives_round_trip() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Binary").await;
        let content: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
        app.upload_image(id, content.clone()).await;

        let res = app.get(&routes::recipe_image(id)).await;

        assert_eq!(res.bytes, content);
    }

    #[tokio::test]
    async fn content_type_follows_configuration() {
        let app = TestApp::spawn_with(|c| c.images.content_type = "image/png".into()).await;
        let id = app.create_recipe("Png Image").await;
        app.upload_image(id, b"\x89PNG".to_vec()).await;

        let res = app.get(&routes::recipe_image(id)).await;

        assert_eq!(res.header("content-type"), Some("image/png"));
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let app = TestApp::spawn().await;

        let res = app.get("/recipe/foo/recipeimage").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.view(), Some("400error"));
    }

    #[tokio::test]
    async fn unknown_recipe_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::recipe_image(4242)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.view(), Some("404error"));
    }

    #[tokio::test]
    async fn show_page_links_image_only_when_present() {
        let app = TestApp::spawn().await;
        let id = app.create_recipe("Linked").await;

        let before = app.get(&routes::show(id)).await;
        assert!(!before.text.contains(&routes::recipe_image(id)));

        app.upload_image(id, b"img".to_vec()).await;
        let after = app.get(&routes::show(id)).await;
        assert!(after.text.contains(&routes::recipe_image(id)));
    }
}
