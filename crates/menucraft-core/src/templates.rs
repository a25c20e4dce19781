//! Built-in menu templates and the gallery catalog.

use crate::model::{
    CanvasSize, EditorObject, FontWeight, MenuDesign, ObjectKind, SerializableColor, ShapeKind,
    ShapeProps, TextAlign, TextProps,
};
use serde::{Deserialize, Serialize};

/// Category name that matches every template.
pub const ALL_CATEGORIES: &str = "All";

const TITLE_FONT: &str = "Playfair Display, serif";
const BODY_FONT: &str = "Inter, sans-serif";

/// Something that can turn a template id into a design bundle.
pub trait TemplateSource {
    /// The design for `id`, or `None` if the id is unknown.
    fn design(&self, id: &str) -> Option<MenuDesign>;
}

/// Gallery listing for a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
}

/// A menu item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub price: String,
}

/// A titled group of menu items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// A template: gallery listing plus optional menu content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub info: TemplateInfo,
    #[serde(default)]
    pub sections: Vec<MenuSection>,
}

/// The built-in template collection.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// The templates shipped with the editor.
    pub fn builtin() -> Self {
        Self::new(vec![
            Template {
                info: info(
                    "template-1",
                    "Classic Bistro",
                    "A clean, elegant menu for upscale restaurants",
                    "Fine Dining",
                    "/templates/classic-bistro.jpg",
                ),
                sections: vec![
                    section(
                        "Appetizers",
                        &[
                            (
                                "Truffle Arancini",
                                "Crispy risotto balls with black truffle and parmesan",
                                "$14",
                            ),
                            (
                                "Beef Carpaccio",
                                "Thinly sliced raw beef with capers and arugula",
                                "$16",
                            ),
                            (
                                "French Onion Soup",
                                "Rich beef broth with caramelized onions and gruyère",
                                "$12",
                            ),
                        ],
                    ),
                    section(
                        "Main Courses",
                        &[
                            ("Filet Mignon", "8oz grass-fed beef with red wine reduction", "$38"),
                            (
                                "Seared Scallops",
                                "Wild-caught scallops with cauliflower purée",
                                "$34",
                            ),
                            ("Duck Confit", "Crispy duck leg with cherry gastrique", "$36"),
                        ],
                    ),
                    section(
                        "Desserts",
                        &[
                            (
                                "Crème Brûlée",
                                "Classic vanilla custard with caramelized sugar",
                                "$10",
                            ),
                            (
                                "Chocolate Soufflé",
                                "Warm chocolate soufflé with vanilla ice cream",
                                "$12",
                            ),
                        ],
                    ),
                ],
            },
            Template {
                info: info(
                    "template-2",
                    "Modern Cafe",
                    "Contemporary design for casual dining spots",
                    "Cafe",
                    "/templates/modern-cafe.jpg",
                ),
                sections: Vec::new(),
            },
            Template {
                info: info(
                    "template-3",
                    "Street Food",
                    "Bold and vibrant menu for food trucks and casual eateries",
                    "Casual",
                    "/templates/street-food.jpg",
                ),
                sections: Vec::new(),
            },
            Template {
                info: info(
                    "template-4",
                    "Italian Trattoria",
                    "Rustic design for authentic Italian restaurants",
                    "Italian",
                    "/templates/italian-trattoria.jpg",
                ),
                sections: Vec::new(),
            },
            Template {
                info: info(
                    "template-5",
                    "Asian Fusion",
                    "Sleek and modern design for contemporary Asian restaurants",
                    "Asian",
                    "/templates/asian-fusion.jpg",
                ),
                sections: Vec::new(),
            },
            Template {
                info: info(
                    "template-6",
                    "Cocktail Bar",
                    "Sophisticated menu for bars and lounges",
                    "Bar",
                    "/templates/cocktail-bar.jpg",
                ),
                sections: Vec::new(),
            },
        ])
    }

    pub fn all(&self) -> impl Iterator<Item = &TemplateInfo> {
        self.templates.iter().map(|t| &t.info)
    }

    pub fn by_id(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.info.id == id)
    }

    /// Distinct categories in catalog order, starting with "All".
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for t in &self.templates {
            if !categories.contains(&t.info.category.as_str()) {
                categories.push(&t.info.category);
            }
        }
        categories
    }

    /// Gallery filter: case-insensitive text match on title or description
    /// plus an exact category match ("All" matches everything).
    pub fn search(&self, query: &str, category: &str) -> Vec<&TemplateInfo> {
        let query = query.trim().to_lowercase();
        self.all()
            .filter(|t| category == ALL_CATEGORIES || t.category == category)
            .filter(|t| {
                query.is_empty()
                    || t.title.to_lowercase().contains(&query)
                    || t.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&TemplateInfo> {
        self.search("", category)
    }
}

impl TemplateSource for TemplateCatalog {
    fn design(&self, id: &str) -> Option<MenuDesign> {
        self.by_id(id).map(build_design)
    }
}

fn info(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    image_url: &str,
) -> TemplateInfo {
    TemplateInfo {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        image_url: image_url.to_string(),
    }
}

fn section(title: &str, items: &[(&str, &str, &str)]) -> MenuSection {
    MenuSection {
        title: title.to_string(),
        items: items
            .iter()
            .map(|&(name, description, price)| MenuItem {
                name: name.to_string(),
                description: description.to_string(),
                price: price.to_string(),
            })
            .collect(),
    }
}

struct TextStyle<'a> {
    family: &'a str,
    size: f64,
    weight: FontWeight,
    align: TextAlign,
    color: SerializableColor,
}

fn text(
    content: &str,
    (x, y, width, height): (f64, f64, f64, f64),
    z_index: i32,
    style: &TextStyle<'_>,
) -> EditorObject {
    let props = TextProps {
        font_family: style.family.to_string(),
        font_size: style.size,
        font_weight: style.weight,
        text_align: style.align,
        color: style.color,
        ..TextProps::new(content)
    };
    let mut obj = EditorObject::new(ObjectKind::Text(props), x, y, width, height);
    obj.z_index = z_index;
    obj
}

/// Lay out a template as a design: title, divider, then sections of items.
fn build_design(template: &Template) -> MenuDesign {
    let canvas_size = CanvasSize::default();
    let width = canvas_size.width as f64;
    let mut design = MenuDesign::new(template.info.title.clone(), canvas_size);
    design.id = template.info.id.clone();

    let heading = |size: f64| TextStyle {
        family: TITLE_FONT,
        size,
        weight: FontWeight::Bold,
        align: TextAlign::Center,
        color: SerializableColor::black(),
    };

    design.objects.push(text(
        &template.info.title,
        (width / 2.0 - 150.0, 80.0, 300.0, 60.0),
        1,
        &heading(36.0),
    ));

    let mut divider = EditorObject::new(
        ObjectKind::Shape(ShapeProps {
            fill: SerializableColor::black(),
            ..ShapeProps::new(ShapeKind::Rectangle)
        }),
        width / 2.0 - 50.0,
        150.0,
        100.0,
        2.0,
    );
    divider.z_index = 2;
    design.objects.push(divider);

    let item_style = |align: TextAlign| TextStyle {
        family: BODY_FONT,
        size: 18.0,
        weight: FontWeight::Medium,
        align,
        color: SerializableColor::black(),
    };
    let description_style = TextStyle {
        family: BODY_FONT,
        size: 14.0,
        weight: FontWeight::Normal,
        align: TextAlign::Left,
        color: SerializableColor::rgb(0x66, 0x66, 0x66),
    };

    let mut y = 200.0;
    for (si, section) in template.sections.iter().enumerate() {
        design.objects.push(text(
            &section.title,
            (width / 2.0 - 100.0, y, 200.0, 40.0),
            3 + si as i32,
            &heading(24.0),
        ));
        y += 60.0;

        for (ii, item) in section.items.iter().enumerate() {
            let z_index = 10 + si as i32 * 10 + ii as i32;
            design.objects.push(text(
                &item.name,
                (100.0, y, 300.0, 30.0),
                z_index,
                &item_style(TextAlign::Left),
            ));
            design.objects.push(text(
                &item.price,
                (width - 150.0, y, 100.0, 30.0),
                z_index,
                &item_style(TextAlign::Right),
            ));
            design.objects.push(text(
                &item.description,
                (100.0, y + 30.0, 500.0, 30.0),
                z_index,
                &description_style,
            ));
            y += 80.0;
        }

        y += 40.0;
    }

    design
}
