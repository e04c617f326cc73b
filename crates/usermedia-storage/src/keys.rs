//! Shared key generation for storage backends.
//!
//! Originals live under `user_media/{user_id}/images/`, thumbnails under a
//! `thumbs/` subdirectory beside them. Thumbnail keys encode their geometry
//! and crop box so each rendered variant has a distinct, reconstructible key.

use uuid::Uuid;

/// Storage key for an original upload:
/// `user_media/{user_id}/images/{image_id}.{ext}`.
pub fn image_key(user_id: Uuid, image_id: Uuid, extension: &str) -> String {
    format!("user_media/{}/images/{}.{}", user_id, image_id, extension)
}

/// Storage key for a rendered thumbnail:
/// `user_media/{user_id}/images/thumbs/{image_id}_{W}x{H}.{ext}`, with a
/// `_{x}-{y}-{x2}-{y2}` suffix before the extension when cropped.
pub fn thumbnail_key(
    user_id: Uuid,
    image_id: Uuid,
    width: u32,
    height: u32,
    crop_box: Option<(i32, i32, i32, i32)>,
    extension: &str,
) -> String {
    match crop_box {
        Some((x, y, x2, y2)) => format!(
            "user_media/{}/images/thumbs/{}_{}x{}_{}-{}-{}-{}.{}",
            user_id, image_id, width, height, x, y, x2, y2, extension
        ),
        None => format!(
            "user_media/{}/images/thumbs/{}_{}x{}.{}",
            user_id, image_id, width, height, extension
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_layout() {
        let user_id = Uuid::nil();
        let image_id = Uuid::nil();
        assert_eq!(
            image_key(user_id, image_id, "jpg"),
            format!("user_media/{}/images/{}.jpg", user_id, image_id)
        );
    }

    #[test]
    fn test_thumbnail_key_without_box() {
        let user_id = Uuid::new_v4();
        let image_id = Uuid::new_v4();
        let key = thumbnail_key(user_id, image_id, 150, 150, None, "png");
        assert_eq!(
            key,
            format!(
                "user_media/{}/images/thumbs/{}_150x150.png",
                user_id, image_id
            )
        );
    }

    #[test]
    fn test_thumbnail_key_with_box() {
        let user_id = Uuid::new_v4();
        let image_id = Uuid::new_v4();
        let key = thumbnail_key(user_id, image_id, 95, 95, Some((0, 10, 200, 210)), "jpg");
        assert_eq!(
            key,
            format!(
                "user_media/{}/images/thumbs/{}_95x95_0-10-200-210.jpg",
                user_id, image_id
            )
        );
    }

    #[test]
    fn test_distinct_boxes_produce_distinct_keys() {
        let user_id = Uuid::new_v4();
        let image_id = Uuid::new_v4();
        let a = thumbnail_key(user_id, image_id, 95, 95, Some((0, 0, 50, 50)), "jpg");
        let b = thumbnail_key(user_id, image_id, 95, 95, Some((0, 0, 60, 60)), "jpg");
        assert_ne!(a, b);
    }
}
