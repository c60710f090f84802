use maud::{Markup, Render, html};

pub const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Secondary,
    Danger,
}

impl ButtonKind {
    pub const fn classes(self) -> &'static str {
        match self {
            Self::Primary => "bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded disabled:opacity-60 disabled:cursor-not-allowed",
            Self::Secondary => "bg-gray-600 hover:bg-gray-700 font-bold py-2 px-4 rounded disabled:opacity-60 disabled:cursor-not-allowed",
            Self::Danger => "bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded disabled:opacity-60 disabled:cursor-not-allowed",
        }
    }

    pub const fn active_if(active: bool) -> Self {
        if active { Self::Primary } else { Self::Secondary }
    }
}

pub fn render_nav() -> Markup {
    html! {
        header class="mb-6 flex flex-row justify-between items-center" {
            a href="/" class="text-2xl font-bold" {"학생 정보 관리"}
            nav class="flex flex-row space-x-4 text-lg font-semibold text-gray-400" {
                a href="/" class="hover:text-white" {"목록"}
                a href="/create" class="hover:text-white" {"학생 등록"}
            }
        }
    }
}

pub fn render_table<const N: usize>(titles: [&'static str; N], items: Vec<[Markup; N]>) -> Markup {
    html! {
        div class="overflow-x-auto" {
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for title in titles {
                            th class="py-2 px-4 text-center font-semibold text-gray-300" {(title)}
                        }
                    }
                }
                tbody {
                    @for row in items {
                        tr {
                            @for col in row {
                                td class="py-2 px-4 border-b border-gray-600 text-gray-200 text-center" {(col)}
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn loading_placeholder() -> Markup {
    html! {
        p class="text-gray-400" {"불러오는 중..."}
    }
}

pub fn form_element(id: &'static str, label: &'static str, element: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (element)
        }
    }
}

pub fn simple_form_element(
    id: &'static str,
    label: &'static str,
    input_type: Option<&'static str>,
    value: Option<&str>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input required type=(input_type.unwrap_or("text")) id=(id) name=(id) value=[value] class=(INPUT_CLASSES) {}
        },
    )
}

/// A label and its value on the detail card.
pub fn detail_row(label: &'static str, value: impl Render) -> Markup {
    html! {
        p class="text-gray-200 mb-2" {
            span class="inline-block w-20 font-semibold" {(label)}
            span class="font-medium" {(value)}
        }
    }
}
