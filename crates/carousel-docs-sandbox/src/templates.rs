//! Templates for generated markup and entry modules.

use minijinja::{context, AutoEscape, Environment, Value};
use serde::{Deserialize, Serialize};

use crate::images::ImageResolver;
use crate::types::{Language, SandboxError};

/// Controls rendered around the carousel viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupControls {
    /// Previous and next buttons
    pub arrows: bool,
    /// Dot navigation container
    pub dots: bool,
    /// Loading indicator slide appended for infinite scroll
    pub infinite_scroll: bool,
}

#[derive(Debug, Serialize)]
struct SlideView {
    number: u32,
    image: String,
}

/// Template engine for sandbox files.
pub struct SandboxTemplates {
    env: Environment<'static>,
}

impl SandboxTemplates {
    /// Create the engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Inputs are example definitions from this repository, rendered verbatim
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for (name, source) in [
            ("carousel.html", CAROUSEL_TEMPLATE),
            ("vanilla-index.html", VANILLA_INDEX_TEMPLATE),
            ("react-index.html", REACT_INDEX_TEMPLATE),
            ("react-entry.jsx", REACT_ENTRY_TEMPLATE),
            ("react-header.jsx", REACT_HEADER_TEMPLATE),
            ("react-footer.jsx", REACT_FOOTER_TEMPLATE),
        ] {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("Failed to add sandbox template");
        }

        Self { env }
    }

    /// Render the carousel markup for a set of slides.
    pub fn carousel_markup(
        &self,
        slides: &[u32],
        controls: &MarkupControls,
        images: &ImageResolver,
    ) -> Result<String, SandboxError> {
        let slides: Vec<SlideView> = slides
            .iter()
            .map(|&index| SlideView {
                number: index + 1,
                image: images.url(index as usize),
            })
            .collect();

        self.render(
            "carousel.html",
            context! {
                slides => slides,
                arrows => controls.arrows,
                dots => controls.dots,
                infinite_scroll => controls.infinite_scroll,
            },
        )
    }

    /// Vanilla `index.html` wrapping the carousel markup.
    pub fn vanilla_index(
        &self,
        title: &str,
        extension: &str,
        carousel: &str,
    ) -> Result<String, SandboxError> {
        self.render(
            "vanilla-index.html",
            context! { title => title, extension => extension, carousel => carousel },
        )
    }

    /// React `public/index.html` with the mount point.
    pub fn react_index(&self, title: &str) -> Result<String, SandboxError> {
        self.render("react-index.html", context! { title => title })
    }

    /// React entry module rendering the app with `options` and `slide_count`.
    pub fn react_entry(
        &self,
        language: Language,
        options: &str,
        slide_count: usize,
    ) -> Result<String, SandboxError> {
        self.render(
            "react-entry.jsx",
            context! {
                typescript => language.is_typescript(),
                options => options,
                slide_count => slide_count,
            },
        )
    }

    /// React header component. The title is emitted as a string literal.
    pub fn react_header(&self, title: &str) -> Result<String, SandboxError> {
        let title_literal = serde_json::Value::from(title).to_string();
        self.render("react-header.jsx", context! { title_literal => title_literal })
    }

    /// React footer component.
    pub fn react_footer(&self) -> Result<String, SandboxError> {
        self.render("react-footer.jsx", context! {})
    }

    fn render(&self, name: &str, ctx: Value) -> Result<String, SandboxError> {
        let template_error = |e: minijinja::Error| SandboxError::Template {
            name: name.to_string(),
            message: e.to_string(),
        };

        self.env
            .get_template(name)
            .map_err(template_error)?
            .render(ctx)
            .map_err(template_error)
    }
}

impl Default for SandboxTemplates {
    fn default() -> Self {
        Self::new()
    }
}

const CAROUSEL_TEMPLATE: &str = r##"<div class="embla">
  <div class="embla__viewport">
    <div class="embla__container">
      {%- for slide in slides %}
      <div class="embla__slide">
        <div class="embla__slide__number"><span>{{ slide.number }}</span></div>
        <img class="embla__slide__img" src="{{ slide.image|e }}" alt="Your alt text">
      </div>
      {%- endfor %}
      {%- if infinite_scroll %}
      <div class="embla-infinite-scroll"><span class="embla-infinite-scroll__spinner"></span></div>
      {%- endif %}
    </div>
  </div>
  {%- if arrows or dots %}
  <div class="embla__controls">
    {%- if arrows %}
    <div class="embla__buttons">
      <button class="embla__button embla__button--prev" type="button">
        <svg class="embla__button__svg" viewBox="0 0 24 24"><path fill="currentColor" d="M15.4 7.4 14 6l-6 6 6 6 1.4-1.4L10.8 12z"></path></svg>
      </button>
      <button class="embla__button embla__button--next" type="button">
        <svg class="embla__button__svg" viewBox="0 0 24 24"><path fill="currentColor" d="M10 6 8.6 7.4 13.2 12l-4.6 4.6L10 18l6-6z"></path></svg>
      </button>
    </div>
    {%- endif %}
    {%- if dots %}
    <div class="embla__dots"></div>
    {%- endif %}
  </div>
  {%- endif %}
</div>"##;

const VANILLA_INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title|e }}</title>
  </head>
  <body>
    <main class="sandbox">
      <section class="sandbox__carousel">{{ carousel }}</section>
    </main>
    <script type="module" src="./src/js/index.{{ extension }}"></script>
  </body>
</html>"##;

const REACT_INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title|e }}</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>"##;

const REACT_ENTRY_TEMPLATE: &str = r##"import React from 'react'
import ReactDOM from 'react-dom/client'
{%- if typescript %}
import { EmblaOptionsType } from 'embla-carousel'
{%- endif %}
import EmblaCarousel from './EmblaCarousel'
import Header from './Header'
import Footer from './Footer'
import '../css/base.css'
import '../css/sandbox.css'
import '../css/embla.css'

const OPTIONS{% if typescript %}: EmblaOptionsType{% endif %} = {{ options }}
const SLIDE_COUNT = {{ slide_count }}
const SLIDES = Array.from(Array(SLIDE_COUNT).keys())

const App = () => (
  <main className="sandbox">
    <Header />
    <section className="sandbox__carousel">
      <EmblaCarousel slides={SLIDES} options={OPTIONS} />
    </section>
    <Footer />
  </main>
)

ReactDOM.createRoot(document.getElementById('root'){% if typescript %} as HTMLElement{% endif %}).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>,
)
"##;

const REACT_HEADER_TEMPLATE: &str = r##"import React from 'react'

const Header = () => (
  <header className="sandbox__header">
    <a className="sandbox__header__title" href="https://www.embla-carousel.com/" target="_blank" rel="noreferrer">
      { {{ title_literal }} }
    </a>
  </header>
)

export default Header
"##;

const REACT_FOOTER_TEMPLATE: &str = r##"import React from 'react'

const Footer = () => (
  <footer className="sandbox__footer">
    Made with <a href="https://github.com/davidjerleke/embla-carousel">Embla Carousel</a>
  </footer>
)

export default Footer
"##;
