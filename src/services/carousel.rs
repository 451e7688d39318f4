// src/services/carousel.rs

//! Testimonial carousel index arithmetic.

use crate::models::{Testimonial, TestimonialKind};

/// Number of video testimonials featured on the home page.
pub const FEATURED_VIDEO_LIMIT: usize = 3;

/// Cursor over a fixed list of testimonials. An empty list is inert.
#[derive(Debug, Clone)]
pub struct Carousel<'a> {
    items: &'a [Testimonial],
    index: usize,
}

impl<'a> Carousel<'a> {
    pub fn new(items: &'a [Testimonial]) -> Self {
        Self { items, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'a Testimonial> {
        self.items.get(self.index)
    }

    /// Advance, wrapping to the first item.
    pub fn next(&mut self) -> Option<&'a Testimonial> {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
        self.current()
    }

    /// Step back, wrapping to the last item.
    pub fn prev(&mut self) -> Option<&'a Testimonial> {
        if !self.is_empty() {
            let len = self.items.len();
            self.index = (self.index + len - 1) % len;
        }
        self.current()
    }

    /// Jump to `index`; out-of-range positions leave the cursor alone.
    pub fn go_to(&mut self, index: usize) -> Option<&'a Testimonial> {
        if index < self.items.len() {
            self.index = index;
            self.current()
        } else {
            None
        }
    }

    /// First video testimonials, at most [`FEATURED_VIDEO_LIMIT`].
    pub fn featured_videos(&self) -> Vec<&'a Testimonial> {
        self.items
            .iter()
            .filter(|t| t.kind == TestimonialKind::Video)
            .take(FEATURED_VIDEO_LIMIT)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    fn video(id: u32) -> Testimonial {
        Testimonial {
            id,
            country: "Canada".into(),
            name: format!("Video {id}"),
            testimonial: String::new(),
            kind: TestimonialKind::Video,
            image: None,
            video: Some(format!("https://example.com/{id}.mp4")),
            scholarship: false,
        }
    }

    #[test]
    fn test_wraps_both_ways() {
        let catalog = Catalog::default();
        let mut carousel = Carousel::new(&catalog.testimonials);
        let len = carousel.len();

        carousel.prev();
        assert_eq!(carousel.index(), len - 1);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        for _ in 0..len {
            carousel.next();
        }
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_go_to_bounds() {
        let catalog = Catalog::default();
        let mut carousel = Carousel::new(&catalog.testimonials);
        assert_eq!(carousel.go_to(2).map(|t| t.id), Some(catalog.testimonials[2].id));
        assert!(carousel.go_to(99).is_none());
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn test_empty_is_inert() {
        let mut carousel = Carousel::new(&[]);
        assert!(carousel.next().is_none());
        assert!(carousel.prev().is_none());
        assert!(carousel.go_to(0).is_none());
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_featured_videos_capped() {
        let items: Vec<Testimonial> = (1..=5).map(video).collect();
        let carousel = Carousel::new(&items);
        let ids: Vec<u32> = carousel.featured_videos().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let catalog = Catalog::default();
        assert!(Carousel::new(&catalog.testimonials).featured_videos().is_empty());
    }
}
