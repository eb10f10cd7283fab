/// Универсальные утилиты для работы со списками (поиск, подсветка, UI компоненты)
use crate::shared::timer::{BrowserTimer, Timer};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу
    fn matches_filter(&self, filter: &str) -> bool;
}

/// A term made only of whitespace filters nothing
pub fn is_blank_filter(filter: &str) -> bool {
    filter.trim().is_empty()
}

/// Фильтрует список по поисковому запросу, сохраняя исходный порядок
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    if is_blank_filter(filter) {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| item.matches_filter(filter))
        .cloned()
        .collect()
}

/// Case-insensitive substring test
pub fn contains_ignore_case(text: &str, filter: &str) -> bool {
    text.to_lowercase().contains(&filter.to_lowercase())
}

/// Cut `value` to `max_length` characters, appending `...` when cut
pub fn truncate_text(value: Option<&str>, max_length: usize) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if value.chars().count() <= max_length {
        return value.to_string();
    }
    let head: String = value.chars().take(max_length).collect();
    format!("{}...", head)
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let text_lower = text.to_lowercase();
    let filter_lower = filter.to_lowercase();

    // Lowercasing must keep byte offsets aligned with the original text
    if is_blank_filter(filter)
        || text_lower.len() != text.len()
        || !text_lower.contains(&filter_lower)
    {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let actual_pos = last_pos + pos;

        if actual_pos > last_pos {
            parts.push(view! { <span>{text[last_pos..actual_pos].to_string()}</span> }.into_any());
        }

        let match_end = actual_pos + filter_lower.len();
        parts.push(
            view! { <mark class="search-match">{text[actual_pos..match_end].to_string()}</mark> }
                .into_any(),
        );

        last_pos = match_end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Search terms with trailing debounce, emitted only when they differ from
/// the last emitted term. Clones share their state.
pub struct SearchDebouncer<T> {
    timer: T,
    debounce: Duration,
    generation: Rc<Cell<u64>>,
    last_emitted: Rc<RefCell<String>>,
}

impl<T: Clone> Clone for SearchDebouncer<T> {
    fn clone(&self) -> Self {
        Self {
            timer: self.timer.clone(),
            debounce: self.debounce,
            generation: Rc::clone(&self.generation),
            last_emitted: Rc::clone(&self.last_emitted),
        }
    }
}

impl<T: Timer> SearchDebouncer<T> {
    pub fn new(timer: T, debounce: Duration) -> Self {
        Self {
            timer,
            debounce,
            generation: Rc::new(Cell::new(0)),
            last_emitted: Rc::new(RefCell::new(String::new())),
        }
    }

    /// Feed a typed value. Resolves to the term to emit once typing paused,
    /// or `None` when newer input arrived or the term did not change.
    pub async fn input(&self, value: String) -> Option<String> {
        let generation = self.advance();
        self.timer.sleep(self.debounce).await;
        if self.generation.get() != generation {
            return None;
        }
        self.emit(value)
    }

    /// Drop pending input and emit the empty term right away
    pub fn clear(&self) -> Option<String> {
        self.advance();
        self.emit(String::new())
    }

    fn advance(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn emit(&self, term: String) -> Option<String> {
        if *self.last_emitted.borrow() == term {
            return None;
        }
        self.last_emitted.replace(term.clone());
        Some(term)
    }
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Задержка перед отправкой значения
    debounce: Duration,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(String::new());
    let debouncer = StoredValue::new_local(SearchDebouncer::new(BrowserTimer, debounce));

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let debouncer = debouncer.get_value();
        spawn_local(async move {
            if let Some(term) = debouncer.input(new_value).await {
                on_change.run(term);
            }
        });
    };

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        if let Some(term) = debouncer.with_value(|debouncer| debouncer.clear()) {
            on_change.run(term);
        }
    };

    view! {
        <div class="search-container">
            <input
                type="text"
                placeholder=placeholder
                aria-label="Search products"
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button class="search-clear" on:click=clear_filter title="Clear">
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::timer::TokioTimer;

    fn debouncer() -> SearchDebouncer<TokioTimer> {
        SearchDebouncer::new(TokioTimer, Duration::from_millis(300))
    }

    async fn typed_after(
        debouncer: &SearchDebouncer<TokioTimer>,
        delay_ms: u64,
        value: &str,
    ) -> Option<String> {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        debouncer.input(value.to_string()).await
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Item(&'static str);

    impl Searchable for Item {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ignore_case(self.0, filter)
        }
    }

    #[test]
    fn test_filter_list_blank_term_keeps_everything() {
        let items = vec![Item("b"), Item("a")];
        assert_eq!(filter_list(&items, ""), items);
        assert_eq!(filter_list(&items, "   "), items);
    }

    #[test]
    fn test_filter_list_preserves_order() {
        let items = vec![Item("Banco 4"), Item("Tarjeta"), Item("banco 1")];
        assert_eq!(
            filter_list(&items, "BANCO"),
            vec![Item("Banco 4"), Item("banco 1")]
        );
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text(None, 30), "");
        assert_eq!(truncate_text(Some("short"), 30), "short");
        assert_eq!(truncate_text(Some("exactly"), 7), "exactly");
        assert_eq!(truncate_text(Some("Tarjeta de crédito"), 10), "Tarjeta de...");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_typing_emits_final_term_once() {
        let d = debouncer();
        let start = tokio::time::Instant::now();

        let results = tokio::join!(
            typed_after(&d, 0, "B"),
            typed_after(&d, 100, "Ba"),
            typed_after(&d, 200, "Ban"),
        );

        assert_eq!(results, (None, None, Some("Ban".to_string())));
        // One debounce after the last keystroke
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert!(start.elapsed() < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_term_is_not_emitted_twice() {
        let d = debouncer();
        assert_eq!(d.input("Banco".into()).await, Some("Banco".into()));
        assert_eq!(d.input("Banco".into()).await, None);

        // Typed away and back before the pause: nothing new to emit
        let results = tokio::join!(typed_after(&d, 0, "Banc"), typed_after(&d, 100, "Banco"));
        assert_eq!(results, (None, None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_emits_empty_term_immediately() {
        let d = debouncer();
        assert_eq!(d.input("Banco".into()).await, Some("Banco".into()));

        let clear_after = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let start = tokio::time::Instant::now();
            let cleared = d.clear();
            (cleared, start.elapsed())
        };
        let (pending, (cleared, waited)) = tokio::join!(typed_after(&d, 0, "Ban"), clear_after);

        assert_eq!(pending, None);
        assert_eq!(cleared, Some(String::new()));
        assert_eq!(waited, Duration::ZERO);
        assert_eq!(d.clear(), None);
    }
}
