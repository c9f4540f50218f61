//! Fixed card skeletons.
//!
//! Every interpolated value comes from `SafeFields` or from trusted
//! constants. Skeletons carry no inline event handlers and no `<style>` or
//! `<script>` elements; image failure handling is left to the host page.

use crate::config::RenderOptions;
use crate::render::date::{format_display_date, relative_age_label};
use crate::render::escape::escape_html;
use crate::render::schema::SafeFields;
use crate::render::RenderContext;
use chrono::{DateTime, Utc};

const EXTERNAL_LINK_ATTRS: &str = r#" target="_blank" rel="noopener noreferrer""#;
const NO_LINK_HREF: &str = "#";

const LINKEDIN_ICON_PATH: &str = "M20.447 20.452h-3.554v-5.569c0-1.328-.027-3.037-1.852-3.037-1.853 0-2.136 1.445-2.136 2.939v5.667H9.351V9h3.414v1.561h.046c.477-.9 1.637-1.85 3.37-1.85 3.601 0 4.267 2.37 4.267 5.455v6.286zM5.337 7.433c-1.144 0-2.063-.926-2.063-2.065 0-1.138.92-2.063 2.063-2.063 1.14 0 2.064.925 2.064 2.063 0 1.139-.925 2.065-2.064 2.065zm1.782 13.019H3.555V9h3.564v11.452zM22.225 0H1.771C.792 0 0 .774 0 1.729v20.542C0 23.227.792 24 1.771 24h20.451C23.2 24 24 23.227 24 22.271V1.729C24 .774 23.2 0 22.222 0h.003z";

/// Tailwind classes for one activity accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentClasses {
    pub name: &'static str,
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

pub const ACTIVITY_PALETTE: [AccentClasses; 6] = [
    AccentClasses {
        name: "green",
        background: "bg-green-50",
        border: "border-green-100",
        text: "text-green-600",
    },
    AccentClasses {
        name: "blue",
        background: "bg-blue-50",
        border: "border-blue-100",
        text: "text-blue-600",
    },
    AccentClasses {
        name: "purple",
        background: "bg-purple-50",
        border: "border-purple-100",
        text: "text-purple-600",
    },
    AccentClasses {
        name: "amber",
        background: "bg-amber-50",
        border: "border-amber-100",
        text: "text-amber-600",
    },
    AccentClasses {
        name: "rose",
        background: "bg-rose-50",
        border: "border-rose-100",
        text: "text-rose-600",
    },
    AccentClasses {
        name: "cyan",
        background: "bg-cyan-50",
        border: "border-cyan-100",
        text: "text-cyan-600",
    },
];

/// Accent for the activity at position `index` in its collection.
pub fn activity_accent(index: usize) -> &'static AccentClasses {
    &ACTIVITY_PALETTE[index % ACTIVITY_PALETTE.len()]
}

pub(crate) fn event_card(fields: &SafeFields, ctx: &RenderContext<'_>) -> String {
    let title = fields.text("title");
    let description = fields.html("description");
    let date = display_date(fields.date("date"), ctx.options);
    let image = match fields.url("image") {
        Some(url) => format!(
            r#"
  <div class="mb-4">
    <img src="{src}" alt="{title}" class="w-full h-48 object-cover rounded-lg" loading="lazy">
  </div>"#,
            src = escape_html(url.as_str()),
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="bg-blue-50 border border-blue-100 rounded-lg shadow hover:shadow-md transition p-6 mb-6">{image}
  <div class="flex justify-between items-start mb-2">
    <h3 class="text-xl font-semibold text-blue-900">{title}</h3>
    <span class="text-sm bg-blue-100 text-blue-800 px-2 py-1 rounded">📅 Event</span>
  </div>
  <div class="flex items-center text-sm text-gray-500 mb-4">
    <span class="mr-4">📅 {date}</span>
    <span class="text-green-600">⏰ Coming Soon</span>
  </div>
  <div class="text-gray-700 leading-relaxed mb-4">{description}</div>
  <div class="pt-4 border-t border-blue-100">
    <span class="text-sm text-blue-600">🔵 Upcoming Event</span>
  </div>
</div>
"#
    )
}

pub(crate) fn activity_card(fields: &SafeFields, ctx: &RenderContext<'_>) -> String {
    let title = fields.text("title");
    let description = fields.html("description");
    let parsed_date = fields.date("date");
    let date = display_date(parsed_date, ctx.options);
    let age = match parsed_date {
        Some(parsed) => relative_age_label(parsed, ctx.now),
        None => escape_html(&ctx.options.relative_age_placeholder),
    };
    let accent = activity_accent(ctx.index);
    let (background, border, accent_text) = (accent.background, accent.border, accent.text);

    format!(
        r#"<div class="{background} border-r-blue-700 border-r-5 shadow hover:shadow-md transition p-6 mb-6">
  <div class="flex justify-between items-start mb-4">
    <div class="flex items-center">
      <span class="text-xl mr-2 {accent_text}">📝</span>
      <span class="text-sm {accent_text} font-medium">{age}</span>
    </div>
    <span class="text-sm {accent_text} px-2 py-1 rounded">✅ Completed</span>
  </div>
  <h3 class="text-xl font-semibold text-gray-900 mb-2">{title}</h3>
  <div class="flex items-center text-sm text-gray-500 mb-4">
    <span class="mr-4">📅 {date}</span>
  </div>
  <div class="text-gray-700 leading-relaxed mb-6">{description}</div>
  <div class="pt-4 border-t {border} text-sm text-gray-500">
    <span>🏷️ Activity • 📍 Completed</span>
  </div>
</div>
"#
    )
}

pub(crate) fn team_member_card(fields: &SafeFields, ctx: &RenderContext<'_>) -> String {
    let name = fields.text("name");
    let position = fields.text("position");
    let image = match fields.url("image_url") {
        Some(url) => escape_html(url.as_str()),
        None => escape_html(&ctx.options.fallback_portrait_url),
    };
    let linkedin = fields.url("linkedin_url");
    let (card_href, card_target) = match fields.url("profile_url").or(linkedin) {
        Some(url) => (escape_html(url.as_str()), EXTERNAL_LINK_ATTRS),
        None => (NO_LINK_HREF.to_string(), ""),
    };
    let linkedin_badge = match linkedin {
        Some(url) => format!(
            r#"
      <a href="{href}"{EXTERNAL_LINK_ATTRS}
         class="absolute -bottom-2 -right-2 w-12 h-12 bg-blue-600 rounded-full flex items-center justify-center text-white shadow-lg hover:bg-blue-700 transform hover:scale-110 transition-all duration-300 z-20"
         aria-label="{name}'s LinkedIn profile">
        <svg class="w-5 h-5" fill="currentColor" viewBox="0 0 24 24" aria-hidden="true">
          <path d="{LINKEDIN_ICON_PATH}"/>
        </svg>
      </a>"#,
            href = escape_html(url.as_str()),
        ),
        None => String::new(),
    };
    let delay_ms = ctx.index.saturating_mul(100);

    format!(
        r#"<div class="group relative bg-gray-800 rounded-2xl overflow-hidden shadow-lg hover:shadow-2xl transition-all duration-500 transform hover:-translate-y-2 animate-fadeIn" style="animation-delay: {delay_ms}ms">
  <a href="{card_href}"{card_target} class="absolute inset-0 z-10 cursor-pointer">
    <span class="sr-only">View {name}'s profile</span>
  </a>
  <div class="absolute inset-0 bg-gradient-to-r from-blue-500 to-purple-500 opacity-0 group-hover:opacity-10 transition-opacity duration-500"></div>
  <div class="relative pt-8 px-6 flex justify-center">
    <div class="relative w-40 h-40">
      <div class="absolute inset-0 bg-gradient-to-r from-blue-400 to-purple-500 rounded-full blur-lg opacity-0 group-hover:opacity-70 transition-opacity duration-500"></div>
      <div class="relative w-full h-full rounded-full overflow-hidden border-4 border-white dark:border-gray-800 shadow-lg">
        <img src="{image}" alt="{name}" class="w-full h-full object-cover transition-transform duration-500 group-hover:scale-110" loading="lazy">
      </div>{linkedin_badge}
    </div>
  </div>
  <div class="py-6 px-6 text-center">
    <h3 class="text-xl font-bold text-gray-800 dark:text-white mb-1">{name}</h3>
    <div class="relative inline-block mb-4">
      <p class="text-blue-600 dark:text-blue-400 font-medium">{position}</p>
      <div class="absolute -bottom-1 left-0 w-0 h-0.5 bg-gradient-to-r from-blue-500 to-purple-500 group-hover:w-full transition-all duration-500"></div>
    </div>
    <div class="text-xs text-gray-500 dark:text-gray-400 mt-4 opacity-0 group-hover:opacity-100 transition-opacity duration-300">Click anywhere to view profile</div>
  </div>
</div>
"#
    )
}

fn display_date(date: Option<DateTime<Utc>>, options: &RenderOptions) -> String {
    match date {
        Some(parsed) => format_display_date(parsed),
        None => escape_html(&options.date_placeholder),
    }
}
