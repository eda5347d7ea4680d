//! Static descriptors for every resource page.

use super::ResourceKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    TextArea,
    Integer,
    Decimal,
    /// Fixed `(value, label)` choices.
    Select(&'static [(&'static str, &'static str)]),
    /// `YYYY-MM-DD`.
    Date,
    Checkbox,
    /// Id of a record in another collection.
    Reference(ResourceKind),
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Decimal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Initial raw value in a create form.
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            default: "",
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn default_value(self, default: &'static str) -> Self {
        Self { default, ..self }
    }
}

#[derive(Debug, PartialEq)]
pub struct ResourceSchema {
    pub kind: ResourceKind,
    pub title: &'static str,
    /// Lower-case singular, used in "Ny …" and confirmation prompts.
    pub singular: &'static str,
    pub empty_message: &'static str,
    pub not_found: &'static str,
    pub columns: &'static [&'static str],
    pub fields: &'static [FieldSpec],
    /// The generic modal form can create records.
    pub creatable: bool,
    pub editable: bool,
    pub deletable: bool,
    pub status_options: &'static [(&'static str, &'static str)],
}

impl ResourceSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Collections the form needs option lists for, in field order.
    pub fn references(&self) -> Vec<ResourceKind> {
        let mut kinds = Vec::new();
        for field in self.fields {
            if let FieldKind::Reference(kind) = field.kind {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    pub fn status_label(&self, value: &str) -> &'static str {
        self.status_options
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, label)| *label)
            .unwrap_or("")
    }
}

pub const PRODUCT_CATEGORIES: &[(&str, &str)] = &[
    ("vitamin", "Vitamin"),
    ("mineral", "Mineral"),
    ("supplement", "Supplement"),
    ("omega", "Omega"),
    ("probiotic", "Probiotic"),
    ("herbal", "Herbal"),
    ("protein", "Protein"),
    ("other", "Annet"),
];

pub const PRODUCT_COLORS: &[(&str, &str)] = &[
    ("d3", "D3 (Orange)"),
    ("omega", "Omega (Blå)"),
    ("mag", "Magnesium (Grønn)"),
    ("csink", "C+Sink (Gul)"),
];

pub const CUSTOMER_TYPES: &[(&str, &str)] = &[("Private", "Privat"), ("Business", "Bedrift")];

pub const CUSTOMER_STATUSES: &[(&str, &str)] = &[
    ("Lead", "Lead"),
    ("New", "Ny"),
    ("Active", "Aktiv"),
    ("VIP", "VIP"),
    ("Inactive", "Inaktiv"),
    ("Lost", "Tapt"),
];

pub const ORDER_STATUSES: &[(&str, &str)] = &[
    ("New", "Ny"),
    ("Processing", "Behandles"),
    ("Packed", "Pakket"),
    ("Shipped", "Sendt"),
    ("Delivered", "Levert"),
    ("Cancelled", "Kansellert"),
    ("Refund", "Refundert"),
];

pub const ORDER_CHANNELS: &[(&str, &str)] = &[
    ("Direct", "Direkte"),
    ("Shopify", "Shopify"),
    ("TikTok", "TikTok"),
    ("Instagram", "Instagram"),
    ("Campaign", "Kampanje"),
];

pub const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("Card", "Kort"),
    ("Vipps", "Vipps"),
    ("Klarna", "Klarna"),
    ("TikTokPay", "TikTok Pay"),
];

pub const PURCHASE_STATUSES: &[(&str, &str)] = &[
    ("Ordered", "Bestilt"),
    ("Received", "Mottatt"),
    ("Cancelled", "Kansellert"),
];

pub const TASK_STATUSES: &[(&str, &str)] = &[
    ("Planned", "Planlagt"),
    ("InProgress", "Pågår"),
    ("Done", "Fullført"),
];

pub const TASK_PRIORITIES: &[(&str, &str)] = &[("High", "Høy"), ("Medium", "Middels"), ("Low", "Lav")];

pub const TASK_TYPES: &[(&str, &str)] = &[
    ("Customer", "Kunde"),
    ("Order", "Ordre"),
    ("Product", "Produkt"),
    ("Stock", "Lager"),
    ("Supplier", "Leverandør"),
    ("Admin", "Admin"),
];

pub const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("COGS", "COGS"),
    ("Marketing", "Marketing"),
    ("Shipping", "Shipping"),
    ("Software", "Software"),
    ("Operations", "Operations"),
];

pub const PAYMENT_STATUSES: &[(&str, &str)] = &[("Unpaid", "Ubetalt"), ("Paid", "Betalt")];

pub const COST_CATEGORIES: &[(&str, &str)] = &[
    ("marketing", "Markedsføring"),
    ("shipping", "Frakt"),
    ("software", "Programvare"),
    ("rent", "Husleie"),
    ("utilities", "Strøm/Internett"),
    ("salaries", "Lønn"),
    ("other", "Annet"),
];

pub const STOCK_STATUSES: &[(&str, &str)] = &[("OK", "OK"), ("Low", "Lav"), ("Out", "Tom")];

pub const PRODUCTS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Products,
    title: "Produkter",
    singular: "produkt",
    empty_message: "Ingen produkter ennå",
    not_found: "Produkt ikke funnet",
    columns: &["Produkt", "SKU", "Kategori", "Pris", "Kost", "Status"],
    fields: &[
        FieldSpec::new("name", "Navn", FieldKind::Text).required(),
        FieldSpec::new("sku", "SKU", FieldKind::Text).required(),
        FieldSpec::new("category", "Kategori", FieldKind::Select(PRODUCT_CATEGORIES))
            .required()
            .default_value("vitamin"),
        FieldSpec::new("description", "Beskrivelse", FieldKind::TextArea),
        FieldSpec::new("price", "Pris (kr)", FieldKind::Decimal).required(),
        FieldSpec::new("cost", "Kostpris (kr)", FieldKind::Decimal).required(),
        FieldSpec::new("supplier_id", "Leverandør", FieldKind::Reference(ResourceKind::Suppliers)),
        FieldSpec::new("color", "Farge", FieldKind::Select(PRODUCT_COLORS)).default_value("omega"),
        FieldSpec::new("min_stock", "Minimum lager", FieldKind::Integer).default_value("80"),
        FieldSpec::new("image_url", "Bilde-URL", FieldKind::Text),
        FieldSpec::new("active", "Aktiv", FieldKind::Checkbox).default_value("true"),
    ],
    creatable: true,
    editable: true,
    deletable: true,
    status_options: &[("Active", "Aktiv"), ("Inactive", "Inaktiv")],
};

pub const CUSTOMERS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Customers,
    title: "Kunder",
    singular: "kunde",
    empty_message: "Ingen kunder ennå",
    not_found: "Kunde ikke funnet",
    columns: &["Navn", "E-post", "Telefon", "By", "Status", "Registrert"],
    fields: &[
        FieldSpec::new("name", "Navn", FieldKind::Text).required(),
        FieldSpec::new("email", "E-post", FieldKind::Email),
        FieldSpec::new("phone", "Telefon", FieldKind::Text),
        FieldSpec::new("address", "Adresse", FieldKind::Text),
        FieldSpec::new("zip_code", "Postnummer", FieldKind::Text),
        FieldSpec::new("city", "By", FieldKind::Text),
        FieldSpec::new("type", "Kundetype", FieldKind::Select(CUSTOMER_TYPES))
            .required()
            .default_value("Private"),
        FieldSpec::new("status", "Status", FieldKind::Select(CUSTOMER_STATUSES))
            .required()
            .default_value("New"),
        FieldSpec::new("tags", "Tagger", FieldKind::Text),
        FieldSpec::new("next_step", "Neste steg", FieldKind::Text),
        FieldSpec::new("notes", "Notater", FieldKind::TextArea),
    ],
    creatable: true,
    editable: true,
    deletable: true,
    status_options: CUSTOMER_STATUSES,
};

/// Orders are created through the line-item form and change state through
/// the status endpoint, so the generic form has no fields.
pub const ORDERS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Orders,
    title: "Ordre",
    singular: "ordre",
    empty_message: "Ingen ordre ennå",
    not_found: "Ordre ikke funnet",
    columns: &["Ordre-ID", "Kunde", "Kanal", "Totalt", "Status", "Dato"],
    fields: &[],
    creatable: false,
    editable: false,
    deletable: true,
    status_options: ORDER_STATUSES,
};

pub const PURCHASES: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Purchases,
    title: "Innkjøp",
    singular: "innkjøp",
    empty_message: "Ingen innkjøp ennå",
    not_found: "Innkjøp ikke funnet",
    columns: &["Ordre-ID", "Leverandør", "Totalt", "Status", "Betaling", "Dato"],
    fields: &[],
    creatable: false,
    editable: false,
    deletable: true,
    status_options: PURCHASE_STATUSES,
};

pub const SUPPLIERS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Suppliers,
    title: "Leverandører",
    singular: "leverandør",
    empty_message: "Ingen leverandører ennå",
    not_found: "Leverandør ikke funnet",
    columns: &["Navn", "Kontaktperson", "E-post", "Telefon", "Nettside"],
    fields: &[
        FieldSpec::new("name", "Navn", FieldKind::Text).required(),
        FieldSpec::new("contact_person", "Kontaktperson", FieldKind::Text),
        FieldSpec::new("email", "E-post", FieldKind::Email),
        FieldSpec::new("phone", "Telefon", FieldKind::Text),
        FieldSpec::new("address", "Adresse", FieldKind::Text),
        FieldSpec::new("website", "Nettside", FieldKind::Text),
        FieldSpec::new("notes", "Notater", FieldKind::TextArea),
    ],
    creatable: true,
    editable: true,
    deletable: true,
    status_options: &[],
};

pub const TASKS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Tasks,
    title: "Oppgaver",
    singular: "oppgave",
    empty_message: "Ingen oppgaver ennå",
    not_found: "Oppgave ikke funnet",
    columns: &["Tittel", "Type", "Prioritet", "Frist", "Status", "Tildelt"],
    fields: &[
        FieldSpec::new("title", "Tittel", FieldKind::Text).required(),
        FieldSpec::new("description", "Beskrivelse", FieldKind::TextArea),
        FieldSpec::new("due_date", "Frist", FieldKind::Date),
        FieldSpec::new("priority", "Prioritet", FieldKind::Select(TASK_PRIORITIES))
            .required()
            .default_value("Medium"),
        FieldSpec::new("type", "Type", FieldKind::Select(TASK_TYPES))
            .required()
            .default_value("Admin"),
        FieldSpec::new("customer_id", "Kunde", FieldKind::Reference(ResourceKind::Customers)),
    ],
    creatable: true,
    editable: true,
    deletable: true,
    status_options: TASK_STATUSES,
};

pub const EXPENSES: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Expenses,
    title: "Utgifter",
    singular: "utgift",
    empty_message: "Ingen utgifter registrert",
    not_found: "Utgift ikke funnet",
    columns: &["Dato", "Kategori", "Beløp", "Status", "Merknad"],
    fields: &[
        FieldSpec::new("category", "Kategori", FieldKind::Select(EXPENSE_CATEGORIES))
            .required()
            .default_value("Marketing"),
        FieldSpec::new("amount", "Beløp (kr)", FieldKind::Decimal).required(),
        FieldSpec::new("payment_status", "Status", FieldKind::Select(PAYMENT_STATUSES))
            .required()
            .default_value("Unpaid"),
        FieldSpec::new("supplier_id", "Leverandør", FieldKind::Reference(ResourceKind::Suppliers)),
        FieldSpec::new("notes", "Merknad", FieldKind::TextArea),
    ],
    creatable: true,
    editable: true,
    deletable: true,
    status_options: PAYMENT_STATUSES,
};

pub const COSTS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Costs,
    title: "Kostnader",
    singular: "kostnad",
    empty_message: "Ingen kostnader registrert",
    not_found: "Kostnad ikke funnet",
    columns: &["Kategori", "Beskrivelse", "Beløp", "Type", "Dato"],
    fields: &[
        FieldSpec::new("category", "Kategori", FieldKind::Select(COST_CATEGORIES))
            .required()
            .default_value("marketing"),
        FieldSpec::new("description", "Beskrivelse", FieldKind::Text).required(),
        FieldSpec::new("amount", "Beløp (kr)", FieldKind::Decimal).required(),
        FieldSpec::new("recurring", "Fast kostnad", FieldKind::Checkbox).default_value("false"),
    ],
    creatable: true,
    editable: false,
    deletable: false,
    status_options: &[],
};

pub const STOCK: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Stock,
    title: "Lager",
    singular: "lagerpost",
    empty_message: "Ingen lagerbeholdning registrert",
    not_found: "Lagerpost ikke funnet",
    columns: &["Produkt", "SKU", "Beholdning", "Min. nivå", "Status", "Verdi"],
    fields: &[],
    creatable: false,
    editable: false,
    deletable: false,
    status_options: STOCK_STATUSES,
};

pub const STOCK_MOVEMENTS: ResourceSchema = ResourceSchema {
    kind: ResourceKind::StockMovements,
    title: "Lagerbevegelser",
    singular: "lagerbevegelse",
    empty_message: "Ingen lagerbevegelser ennå",
    not_found: "Lagerbevegelse ikke funnet",
    columns: &["Dato", "Produkt", "Type", "Antall", "Referanse", "Merknad"],
    fields: &[],
    creatable: false,
    editable: false,
    deletable: false,
    status_options: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builders() {
        let f = FieldSpec::new("price", "Pris", FieldKind::Decimal)
            .required()
            .default_value("0");
        assert!(f.required);
        assert_eq!(f.default, "0");
        assert!(f.kind.is_numeric());
    }

    #[test]
    fn test_references_deduplicated() {
        assert_eq!(PRODUCTS.references(), vec![ResourceKind::Suppliers]);
        assert_eq!(TASKS.references(), vec![ResourceKind::Customers]);
        assert!(SUPPLIERS.references().is_empty());
    }

    #[test]
    fn test_status_label() {
        assert_eq!(TASKS.status_label("InProgress"), "Pågår");
        assert_eq!(TASKS.status_label("Unknown"), "");
    }

    #[test]
    fn test_title_is_required_for_tasks() {
        assert!(TASKS.field("title").unwrap().required);
        assert!(!TASKS.field("due_date").unwrap().required);
    }
}
