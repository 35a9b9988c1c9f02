use leptos::prelude::*;

/// Labelled native date picker
/// The browser shows the date in the user's locale; the value stays yyyy-mm-dd
#[component]
pub fn DateInput(
    /// Element id, also used by the label
    id: &'static str,
    label: &'static str,
    /// The date value in yyyy-mm-dd format
    #[prop(into)]
    value: Signal<String>,
    /// Callback when the date changes (receives yyyy-mm-dd format)
    on_change: impl Fn(String) + 'static,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label" for=id>{label}</label>
            <input
                id=id
                name=id
                type="date"
                class="form__input"
                required=required
                prop:value=value
                on:input=move |ev| {
                    on_change(event_target_value(&ev));
                }
            />
        </div>
    }
}
