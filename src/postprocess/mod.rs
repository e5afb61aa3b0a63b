//! Post-Processor
//!
//! Finalizes the selected content subtree, in order:
//!
//! 1. lazy-load image URLs into `src`
//! 2. relative `href`/`src` resolution (when a base URL is known)
//! 3. the profile's hook (forum thread reconstruction)
//! 4. attribute allow-list
//! 5. `rel="noopener noreferrer"` on `target="_blank"` links
//! 6. heading level repair
//! 7. table `thead`/`tbody` sections
//! 8. math/code markup in text nodes
//! 9. empty paragraph removal
//!
//! The hook runs before the allow-list because post detection reads
//! attributes such as `data-post-id` that the allow-list drops.
//!
//! Nothing outside the subtree is touched.

pub mod attributes;
pub mod markup;
pub mod structure;

use dom_query::Selection;
use tracing::debug;
use url::Url;

use crate::dom;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::options::Options;
use crate::variant::VariantProfile;

/// Run the post-processing pass over `content`.
///
/// # Errors
///
/// Propagates the profile hook's error, e.g.
/// [`crate::Error::MissingMainPost`] for a forum page without posts.
pub fn post_process(
    content: &Selection,
    profile: &VariantProfile,
    opts: &Options,
    base_url: Option<&Url>,
    metadata: &mut Metadata,
) -> Result<()> {
    let lazy_images = attributes::resolve_lazy_images(content);
    if opts.resolve_urls {
        if let Some(base) = base_url {
            attributes::resolve_urls(content, base);
        }
    }
    if let Some(hook) = profile.post_process {
        hook(content, metadata)?;
    }

    let attrs_removed = attributes::filter_attributes(content);
    attributes::secure_blank_targets(content);

    let headings_fixed = structure::repair_headings(content);
    structure::normalize_tables(content);

    let markup = if opts.markup_math_and_code {
        markup::markup_math_and_code(content)
    } else {
        0
    };
    let empty_paragraphs = remove_empty_paragraphs(content);

    debug!(
        lazy_images,
        attrs_removed, headings_fixed, markup, empty_paragraphs, "post-processed content"
    );
    Ok(())
}

/// Remove `<p>` elements with no text and no media. Returns the count.
pub fn remove_empty_paragraphs(content: &Selection) -> usize {
    let mut removed = 0;
    for p in content.select("p").iter() {
        if dom::text_content(&p).trim().is_empty() && !dom::has_media(&p) {
            p.remove();
            removed += 1;
        }
    }
    removed
}
