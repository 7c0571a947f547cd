//! The static fallback catalog.
//!
//! When the backend cannot be reached the [`Hub`](crate::Hub) serves these sample
//! resources instead, so consumers always have something to render. The list is fixed:
//! ids, counters and dates never change between calls.

use super::*;

lazy_static! {
  /// Sample resources spanning every category, license and a spread of formats and sizes.
  static ref FALLBACK_RESOURCES: Vec<Resource> = vec![
    sample(Sample {
      id:          "1",
      title:       "Modern Sans Font Family",
      description: "A versatile sans-serif family with 12 weights for headlines and body copy.",
      category:    "fonts",
      is_premium:  false,
      downloads:   1250,
      likes:       342,
      tags:        &["sans-serif", "typography", "modern"],
      author:      "Design Studio",
      date_added:  "2024-01-15",
      file_size:   "2.5 MB",
      format:      "TTF, OTF",
      license:     License::Free,
      colors:      &["black", "white"],
    }),
    sample(Sample {
      id:          "2",
      title:       "Business Landing Page Template",
      description: "Responsive landing page template with pricing, testimonials and contact blocks.",
      category:    "templates",
      is_premium:  true,
      downloads:   890,
      likes:       215,
      tags:        &["landing page", "business", "responsive"],
      author:      "WebCraft",
      date_added:  "2024-02-03",
      file_size:   "15 MB",
      format:      "HTML, Figma",
      license:     License::Premium,
      colors:      &["blue", "white", "gray"],
    }),
    sample(Sample {
      id:          "3",
      title:       "Mountain Landscape Photo Pack",
      description: "Forty high-resolution mountain photographs shot at golden hour.",
      category:    "photos",
      is_premium:  false,
      downloads:   2100,
      likes:       530,
      tags:        &["nature", "mountains", "landscape"],
      author:      "Peak Photography",
      date_added:  "2023-11-20",
      file_size:   "1.2 GB",
      format:      "JPG",
      license:     License::Free,
      colors:      &["orange", "purple", "blue"],
    }),
    sample(Sample {
      id:          "4",
      title:       "Minimal Line Icon Set",
      description: "Six hundred pixel-perfect line icons for interfaces and presentations.",
      category:    "graphics",
      is_premium:  false,
      downloads:   3400,
      likes:       780,
      tags:        &["icons", "ui", "minimal"],
      author:      "Iconify Lab",
      date_added:  "2024-03-10",
      file_size:   "850 KB",
      format:      "SVG, PNG",
      license:     License::Free,
      colors:      &["black"],
    }),
    sample(Sample {
      id:          "5",
      title:       "Elegant Serif Display Font",
      description: "High-contrast display serif with ligatures and alternates for editorial work.",
      category:    "fonts",
      is_premium:  true,
      downloads:   640,
      likes:       190,
      tags:        &["serif", "display", "editorial"],
      author:      "Type Foundry",
      date_added:  "2024-01-28",
      file_size:   "4 MB",
      format:      "OTF",
      license:     License::Commercial,
      colors:      &["black", "gold"],
    }),
    sample(Sample {
      id:          "6",
      title:       "E-commerce UI Kit",
      description: "Complete mobile shop UI kit with 80 screens and a shared component library.",
      category:    "templates",
      is_premium:  true,
      downloads:   1120,
      likes:       410,
      tags:        &["ui kit", "mobile", "shop"],
      author:      "Pixel Forge",
      date_added:  "2023-12-05",
      file_size:   "45 MB",
      format:      "Figma, XD",
      license:     License::Commercial,
      colors:      &["green", "white"],
    }),
    sample(Sample {
      id:          "7",
      title:       "Urban Street Photography",
      description: "Candid city scenes and architecture in black and white.",
      category:    "photos",
      is_premium:  true,
      downloads:   780,
      likes:       260,
      tags:        &["city", "street", "monochrome"],
      author:      "Lens Collective",
      date_added:  "2024-02-18",
      file_size:   "320 MB",
      format:      "JPG, RAW",
      license:     License::Premium,
      colors:      &["black", "white", "gray"],
    }),
    sample(Sample {
      id:          "8",
      title:       "Abstract Gradient Backgrounds",
      description: "Vibrant abstract gradients for hero sections, slides and social posts.",
      category:    "graphics",
      is_premium:  false,
      downloads:   2650,
      likes:       615,
      tags:        &["abstract", "gradient", "background"],
      author:      "Color Theory",
      date_added:  "2024-03-22",
      file_size:   "120 MB",
      format:      "PNG, PSD",
      license:     License::Free,
      colors:      &["pink", "purple", "orange"],
    }),
  ];
}

/// Literal fields of one catalog entry.
struct Sample {
  /// Resource id
  id:          &'static str,
  /// Display title
  title:       &'static str,
  /// One-sentence description
  description: &'static str,
  /// Category slug
  category:    &'static str,
  /// Whether a subscription is needed
  is_premium:  bool,
  /// Download counter
  downloads:   u64,
  /// Like counter
  likes:       u64,
  /// Search tags
  tags:        &'static [&'static str],
  /// Author name
  author:      &'static str,
  /// `YYYY-MM-DD` upload date
  date_added:  &'static str,
  /// Human readable size
  file_size:   &'static str,
  /// File format
  format:      &'static str,
  /// License tier
  license:     License,
  /// Dominant colours
  colors:      &'static [&'static str],
}

/// Expands a catalog entry into a full [`Resource`].
fn sample(s: Sample) -> Resource {
  let owned = |values: &[&str]| values.iter().map(|v| (*v).to_string()).collect::<Vec<_>>();
  Resource {
    id:             s.id.into(),
    title:          s.title.into(),
    description:    s.description.into(),
    image:          format!("/images/resources/{}.jpg", s.id),
    category:       s.category.into(),
    is_premium:     s.is_premium,
    downloads:      s.downloads,
    likes:          s.likes,
    tags:           owned(s.tags),
    author:         s.author.into(),
    date_added:     s.date_added.into(),
    file_size:      Some(s.file_size.into()),
    format:         Some(s.format.into()),
    license:        s.license,
    colors:         Some(owned(s.colors)),
    average_rating: None,
    total_ratings:  None,
  }
}

/// Returns a copy of the fallback catalog.
pub fn fallback_resources() -> Vec<Resource> { FALLBACK_RESOURCES.clone() }
