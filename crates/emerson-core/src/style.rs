//! Stylesheet appended at install time for the entrance animations.

use crate::config::RevealConfig;

/// Hidden/visible states for revealed elements plus the `fadeSlideUp`
/// keyframes used by staggered groups.
pub fn animation_stylesheet(reveal: &RevealConfig) -> String {
    let pending = &reveal.pending_class;
    let visible = &reveal.visible_class;
    format!(
        r#"
.{pending} {{
  opacity: 0;
  transform: translateY(40px);
  transition: opacity 0.8s ease-out, transform 0.8s ease-out;
}}

.{pending}.{visible} {{
  opacity: 1;
  transform: translateY(0);
}}

@keyframes fadeSlideUp {{
  from {{
    opacity: 0;
    transform: translateY(40px);
  }}
  to {{
    opacity: 1;
    transform: translateY(0);
  }}
}}
"#
    )
}
