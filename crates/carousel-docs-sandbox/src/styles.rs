//! Stylesheets shipped with every sandbox.

/// Page reset and typography.
pub const BASE_CSS: &str = r#"
*,
*::before,
*::after {
  box-sizing: inherit;
}
html {
  box-sizing: border-box;
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.5;
  color: rgb(54, 49, 61);
  background-color: rgb(255, 255, 255);
}
body {
  margin: 0;
}
img {
  display: block;
  max-width: 100%;
}
"#;

/// Sandbox page layout around the carousel.
pub const SANDBOX_CSS: &str = r#"
.sandbox {
  width: 100%;
  min-height: 100vh;
  display: flex;
  flex-direction: column;
  justify-content: center;
}
.sandbox__header,
.sandbox__footer {
  padding: 1.6rem;
  text-align: center;
}
.sandbox__header__title {
  font-size: 1.6rem;
  font-weight: 700;
  color: inherit;
  text-decoration: none;
}
.sandbox__carousel {
  position: relative;
  margin: 0 auto;
  max-width: 67rem;
  width: 100%;
}
"#;

/// Carousel styles used by the default examples.
pub const EMBLA_CSS: &str = r#"
.embla {
  --slide-spacing: 1rem;
  --slide-size: 100%;
  --slide-height: 19rem;
  padding: 1.6rem;
}
.embla__viewport {
  overflow: hidden;
}
.embla__container {
  backface-visibility: hidden;
  display: flex;
  touch-action: pan-y;
  margin-left: calc(var(--slide-spacing) * -1);
}
.embla__slide {
  flex: 0 0 var(--slide-size);
  min-width: 0;
  padding-left: var(--slide-spacing);
  position: relative;
}
.embla__slide__img {
  display: block;
  height: var(--slide-height);
  width: 100%;
  object-fit: cover;
}
.embla__slide__number {
  position: absolute;
  top: 0.6rem;
  right: 0.6rem;
  z-index: 1;
  font-weight: 900;
}
.embla__controls {
  display: flex;
  justify-content: space-between;
  margin-top: 1.8rem;
}
.embla__buttons {
  display: flex;
  gap: 0.6rem;
}
.embla__button {
  appearance: none;
  background-color: transparent;
  touch-action: manipulation;
  cursor: pointer;
  border: 0;
  padding: 0;
  width: 3.6rem;
  height: 3.6rem;
}
.embla__button:disabled {
  opacity: 0.3;
}
.embla__dots {
  display: flex;
  flex-wrap: wrap;
  justify-content: flex-end;
  gap: 0.6rem;
}
.embla__dot {
  appearance: none;
  border: 0;
  border-radius: 50%;
  cursor: pointer;
  width: 1.2rem;
  height: 1.2rem;
  background-color: rgb(234, 234, 234);
}
.embla__dot--selected {
  background-color: rgb(54, 49, 61);
}
"#;

/// Extra rules for the infinite scroll loading indicator.
pub const INFINITE_SCROLL_CSS: &str = r#"
.embla-infinite-scroll {
  position: relative;
  flex: 0 0 15rem;
  min-width: 0;
  height: var(--slide-height);
  display: flex;
  align-items: center;
  justify-content: center;
  opacity: 0;
}
.embla-infinite-scroll--loading-more {
  opacity: 1;
}
.embla-infinite-scroll__spinner {
  display: inline-block;
  width: 4rem;
  height: 4rem;
  border: 0.4rem solid rgba(54, 49, 61, 0.2);
  border-left-color: rgb(54, 49, 61);
  border-radius: 50%;
  animation: embla-spinner 1.1s linear infinite;
}
@keyframes embla-spinner {
  0% {
    transform: rotate(0deg);
  }
  100% {
    transform: rotate(360deg);
  }
}
"#;
