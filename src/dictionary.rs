//! The built-in keyword dictionary used to guess a category from a transaction detail.
//!
//! Keywords are written the way people in Chile actually describe their
//! spending: merchant names, chains, slang and the odd typo that shows up often
//! enough on bank statements. They are matched after [crate::normalize], so
//! accents and case do not matter here.
//!
//! Both the order of the categories and the order of the keywords inside each
//! category are significant: categories that end up with the same score are
//! ranked in declaration order.

/// A category name and the keywords that suggest it.
pub type CategoryKeywords = (&'static str, &'static [&'static str]);

/// Every category the categorizer knows about, with its keywords.
pub static KEYWORD_DICTIONARY: &[CategoryKeywords] = &[
    (
        "Comida",
        &[
            "almuerzo",
            "desayuno",
            "tomar once",
            "cena",
            "comida",
            "restaurant",
            "restaurante",
            "resto bar",
            "picada",
            "cafeteria",
            "cafe",
            "starbucks",
            "juan valdez",
            "dunkin",
            "mcdonalds",
            "mc donalds",
            "burger king",
            "wendys",
            "kfc",
            "subway",
            "pizza",
            "pizzeria",
            "papa johns",
            "dominos",
            "telepizza",
            "little caesars",
            "doggis",
            "juan maestro",
            "tarragona",
            "sushi",
            "ramen",
            "empanada",
            "empanadas",
            "completo",
            "completos",
            "churrasco",
            "chorrillana",
            "sanguche",
            "sandwich",
            "hamburguesa",
            "pollo asado",
            "pollo frito",
            "fuente de soda",
            "schopdog",
            "delivery",
            "rappi",
            "uber eats",
            "pedidos ya",
            "pedidosya",
            "cornershop",
            "helado",
            "heladeria",
            "pasteleria",
            "panaderia",
            "kuchen",
            "sopaipilla",
            "cerveza",
            "chela",
            "copete",
            "bebida",
            "jugo",
            "colacion",
            "casino",
            "food truck",
            "patio de comida",
        ],
    ),
    (
        "Supermercado",
        &[
            "supermercado",
            "super",
            "lider",
            "jumbo",
            "santa isabel",
            "unimarc",
            "tottus",
            "acuenta",
            "alvi",
            "mayorista 10",
            "montserrat",
            "ok market",
            "oxxo",
            "big john",
            "minimarket",
            "almacen",
            "botilleria",
            "verduleria",
            "feria",
            "carniceria",
            "pescaderia",
            "despensa",
            "mercaderia",
            "abarrotes",
            "compras del mes",
            "walmart",
            "frutas",
            "verduras",
            "huevos",
            "leche",
            "pan amasado",
        ],
    ),
    (
        "Transporte",
        &[
            "uber",
            "didi",
            "cabify",
            "indriver",
            "taxi",
            "colectivo",
            "micro",
            "metro",
            "bip",
            "tarjeta bip",
            "red movilidad",
            "transantiago",
            "merval",
            "biotren",
            "pasaje bus",
            "buses",
            "turbus",
            "pullman",
            "terminal",
            "bencina",
            "gasolina",
            "combustible",
            "petroleo",
            "diesel",
            "copec",
            "shell",
            "petrobras",
            "aramco",
            "enex",
            "estacionamiento",
            "parquimetro",
            "peaje",
            "autopista",
            "cobro tag",
            "costanera norte",
            "autopista central",
            "vespucio",
            "revision tecnica",
            "permiso de circulacion",
            "soap",
            "mecanico",
            "taller mecanico",
            "neumaticos",
            "cambio de aceite",
            "lavado de auto",
            "aeropuerto",
            "scooter",
            "bicicleta",
        ],
    ),
    (
        "Vivienda",
        &[
            "arriendo",
            "alquiler",
            "dividendo",
            "hipotecario",
            "gastos comunes",
            "gasto comun",
            "condominio",
            "administracion edificio",
            "conserje",
            "corredora de propiedades",
            "contribuciones",
            "mantencion",
            "reparacion",
            "gasfiter",
            "electricista",
            "maestro",
            "pintura",
            "ferreteria",
            "sodimac",
            "easy",
            "construmart",
            "imperial",
            "homecenter",
            "muebles",
            "mueble",
            "colchon",
            "ikea",
            "decoracion",
            "mudanza",
            "cerrajero",
            "jardineria",
            "asesora del hogar",
        ],
    ),
    (
        "Servicios Básicos",
        &[
            "cuenta de luz",
            "luz",
            "electricidad",
            "enel",
            "cge",
            "chilquinta",
            "saesa",
            "frontel",
            "cuenta del agua",
            "agua potable",
            "aguas andinas",
            "esval",
            "essbio",
            "nuevosur",
            "aguas del valle",
            "cuenta del gas",
            "gas licuado",
            "balon de gas",
            "abastible",
            "lipigas",
            "gasco",
            "metrogas",
            "calefaccion",
            "parafina",
            "lena para estufa",
            "internet",
            "fibra optica",
            "wifi",
            "telefono",
            "celular",
            "plan movil",
            "recarga",
            "entel",
            "movistar",
            "claro",
            "wom movil",
            "wom s a",
            "vtr",
            "mundo pacifico",
            "gtd",
            "directv",
            "tv cable",
            "basura",
            "extraccion de basura",
        ],
    ),
    (
        "Salud",
        &[
            "farmacia",
            "cruz verde",
            "salcobrand",
            "ahumada",
            "dr simi",
            "remedio",
            "remedios",
            "medicamento",
            "medicamentos",
            "receta",
            "doctor",
            "medico",
            "consulta medica",
            "especialista",
            "dentista",
            "odontologo",
            "ortodoncia",
            "kinesiologo",
            "kinesiologia",
            "psicologo",
            "psiquiatra",
            "terapia",
            "nutricionista",
            "oftalmologo",
            "lentes opticos",
            "optica",
            "examen",
            "examenes",
            "laboratorio",
            "clinica",
            "hospital",
            "urgencia",
            "cesfam",
            "consultorio",
            "isapre",
            "fonasa",
            "colmena",
            "banmedica",
            "cruz blanca",
            "consalud",
            "vida tres",
            "nueva masvida",
            "bono fonasa",
            "seguro de salud",
            "seguro complementario",
            "vacuna",
            "integramedica",
            "redsalud",
        ],
    ),
    (
        "Educación",
        &[
            "colegio",
            "colegiatura",
            "mensualidad colegio",
            "matricula",
            "arancel",
            "universidad",
            "instituto",
            "preuniversitario",
            "jardin infantil",
            "sala cuna",
            "curso",
            "cursos",
            "diplomado",
            "magister",
            "postgrado",
            "clases particulares",
            "profesor particular",
            "udemy",
            "coursera",
            "platzi",
            "domestika",
            "duolingo",
            "libreria",
            "libro",
            "libros",
            "utiles escolares",
            "lista de utiles",
            "uniforme escolar",
            "fotocopias",
            "credito cae",
            "credito universitario",
        ],
    ),
    (
        "Entretenimiento",
        &[
            "cine",
            "cinemark",
            "cineplanet",
            "cinepolis",
            "hoyts",
            "teatro",
            "concierto",
            "recital",
            "entradas",
            "ticketmaster",
            "puntoticket",
            "passline",
            "festival",
            "lollapalooza",
            "estadio",
            "partido",
            "discoteque",
            "disco",
            "carrete",
            "karaoke",
            "bowling",
            "museo",
            "parque de diversiones",
            "fantasilandia",
            "mampato",
            "zoologico",
            "juegos",
            "videojuego",
            "playstation",
            "xbox",
            "nintendo",
            "steam",
            "juego de mesa",
            "apuesta",
            "loto",
            "kino",
            "polla",
            "casino enjoy",
            "casino dreams",
            "monticello",
            "salida con amigos",
        ],
    ),
    (
        "Suscripciones",
        &[
            "netflix",
            "spotify",
            "disney plus",
            "disney",
            "hbo max",
            "amazon prime",
            "prime video",
            "star plus",
            "paramount",
            "apple tv",
            "apple music",
            "youtube premium",
            "deezer",
            "crunchyroll",
            "twitch",
            "icloud",
            "google one",
            "google storage",
            "dropbox",
            "microsoft 365",
            "office 365",
            "adobe",
            "canva",
            "chatgpt",
            "openai",
            "suscripcion",
            "membresia",
            "patreon",
            "onlyfans",
            "game pass",
            "playstation plus",
        ],
    ),
    (
        "Ropa",
        &[
            "ropa",
            "vestuario",
            "zapatos",
            "zapatillas",
            "calzado",
            "polera",
            "poleron",
            "pantalon",
            "jeans",
            "chaqueta",
            "parka",
            "vestido",
            "falda",
            "camisa",
            "calcetines",
            "ropa interior",
            "traje",
            "corbata",
            "cartera",
            "mochila",
            "accesorios",
            "falabella",
            "paris",
            "ripley",
            "la polar",
            "hites",
            "tricot",
            "corona",
            "h m",
            "zara",
            "forever 21",
            "bershka",
            "pull bear",
            "adidas",
            "nike",
            "puma",
            "skechers",
            "bata",
            "guante",
            "fashion park",
            "shein",
            "tienda de ropa",
            "outlet",
            "ropa americana",
        ],
    ),
    (
        "Tecnología",
        &[
            "computador",
            "notebook",
            "laptop",
            "tablet",
            "ipad",
            "iphone",
            "smartphone",
            "audifonos",
            "teclado",
            "mouse",
            "monitor",
            "impresora",
            "tinta",
            "cargador",
            "cable usb",
            "disco duro",
            "pendrive",
            "pc factory",
            "spdigital",
            "sp digital",
            "mercado libre",
            "aliexpress",
            "amazon",
            "temu",
            "apple store",
            "mac online",
            "samsung",
            "xiaomi",
            "huawei",
            "lenovo",
            "consola",
            "televisor",
            "smart tv",
            "electrodomestico",
            "refrigerador",
            "lavadora",
            "microondas",
            "aspiradora",
            "servicio tecnico",
        ],
    ),
    (
        "Cuidado Personal",
        &[
            "peluqueria",
            "barberia",
            "corte de pelo",
            "manicure",
            "pedicure",
            "depilacion",
            "day spa",
            "spa facial",
            "masaje",
            "estetica",
            "cosmetica",
            "maquillaje",
            "perfume",
            "perfumeria",
            "preunic",
            "maicao",
            "dbs",
            "sephora",
            "natura",
            "avon",
            "shampoo",
            "desodorante",
            "crema",
            "bloqueador",
            "cepillo de dientes",
            "pasta de dientes",
            "jabon",
            "toallas higienicas",
            "panales",
            "afeitadora",
        ],
    ),
    (
        "Mascotas",
        &[
            "mascota",
            "mascotas",
            "veterinaria",
            "veterinario",
            "perro",
            "gato",
            "comida de perro",
            "comida de gato",
            "alimento mascota",
            "croquetas",
            "pellet",
            "arena sanitaria",
            "superzoo",
            "club de perros y gatos",
            "tienda de mascotas",
            "pet shop",
            "petco",
            "peluqueria canina",
            "antiparasitario",
            "collar",
            "guarderia canina",
        ],
    ),
    (
        "Viajes",
        &[
            "viaje",
            "viajes",
            "vacaciones",
            "vuelo",
            "pasaje aereo",
            "pasajes",
            "latam",
            "sky airline",
            "jetsmart",
            "aerolineas",
            "hotel",
            "hostal",
            "motel",
            "airbnb",
            "booking",
            "despegar",
            "cabana",
            "camping",
            "alojamiento",
            "tour",
            "excursion",
            "seguro de viaje",
            "equipaje",
            "pasaporte",
            "visa de turista",
            "casa de cambio",
            "duty free",
            "san pedro de atacama",
            "torres del paine",
            "pucon",
            "la serena",
            "vina del mar",
        ],
    ),
    (
        "Deporte",
        &[
            "gimnasio",
            "gym",
            "smartfit",
            "smart fit",
            "energy",
            "sportlife",
            "pacific fitness",
            "crossfit",
            "yoga",
            "pilates",
            "spinning",
            "entrenador personal",
            "personal trainer",
            "futbolito",
            "cancha",
            "arriendo de cancha",
            "padel",
            "tenis",
            "natacion",
            "piscina",
            "club deportivo",
            "inscripcion maraton",
            "maraton",
            "decathlon",
            "implementos deportivos",
            "proteina",
            "suplementos",
        ],
    ),
    (
        "Regalos",
        &[
            "regalo",
            "regalos",
            "cumpleanos",
            "aniversario",
            "navidad",
            "amigo secreto",
            "dia de la madre",
            "dia del padre",
            "dia del nino",
            "san valentin",
            "baby shower",
            "matrimonio",
            "despedida",
            "flores",
            "floreria",
            "chocolates",
            "tarjeta de regalo",
            "gift card",
            "donacion",
            "teleton",
            "hogar de cristo",
            "coaniquem",
            "ofrenda",
            "diezmo",
        ],
    ),
    (
        "Bancos y Comisiones",
        &[
            "comision",
            "comisiones",
            "mantencion cuenta",
            "costo de mantencion",
            "cargo por servicio",
            "interes",
            "intereses",
            "impuesto de timbres",
            "seguro de desgravamen",
            "pago tarjeta",
            "pago minimo",
            "cuota",
            "avance en efectivo",
            "linea de credito",
            "credito de consumo",
            "prestamo",
            "deuda",
            "repactacion",
            "multa",
            "giro cajero",
            "banco estado",
            "banco de chile",
            "santander",
            "bci",
            "scotiabank",
            "itau",
            "cmr",
            "tarjeta ripley",
        ],
    ),
    (
        "Sueldo",
        &[
            "sueldo",
            "salario",
            "remuneracion",
            "liquidacion de sueldo",
            "pago de sueldo",
            "nomina",
            "gratificacion",
            "aguinaldo",
            "bono",
            "horas extra",
            "finiquito",
            "anticipo",
            "quincena",
            "pension",
            "jubilacion",
            "pgu",
        ],
    ),
    (
        "Freelance",
        &[
            "freelance",
            "honorarios",
            "boleta de honorarios",
            "proyecto",
            "cliente",
            "asesoria",
            "consultoria",
            "trabajo extra",
            "pololo",
            "pega extra",
            "venta",
            "ventas",
            "emprendimiento",
            "workana",
            "fiverr",
            "upwork",
            "propina",
            "propinas",
        ],
    ),
    (
        "Otros Ingresos",
        &[
            "reembolso",
            "devolucion",
            "devolucion de impuestos",
            "operacion renta",
            "transferencia recibida",
            "me pagaron",
            "me devolvieron",
            "premio",
            "herencia",
            "arriendo recibido",
            "subsidio",
            "bono estatal",
            "retiro afp",
            "cashback",
        ],
    ),
    (
        "Inversiones",
        &[
            "inversion",
            "invertir",
            "acciones",
            "fondo mutuo",
            "fondos mutuos",
            "fondo etf",
            "deposito a plazo",
            "bolsa",
            "corredora de bolsa",
            "fintual",
            "racional",
            "renta4",
            "tenpo",
            "mercado pago inversion",
            "bitcoin",
            "btc",
            "ethereum",
            "cripto",
            "criptomoneda",
            "buda",
            "binance",
            "dolar",
            "dividendos recibidos",
            "apv",
            "ahorro previsional voluntario",
            "cuenta 2",
        ],
    ),
    (
        "Ahorro",
        &[
            "ahorro",
            "ahorros",
            "ahorrar",
            "cuenta de ahorro",
            "cuenta rut ahorro",
            "libreta de ahorro",
            "alcancia",
            "fondo de emergencia",
            "meta de ahorro",
            "chanchito",
            "guardar plata",
        ],
    ),
];

/// The keywords registered for `category`, if it is in the dictionary.
pub fn keywords_for(category: &str) -> Option<&'static [&'static str]> {
    KEYWORD_DICTIONARY
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, keywords)| *keywords)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{KEYWORD_DICTIONARY, keywords_for};
    use crate::{category_kinds::kind_of, normalize::normalize};

    #[test]
    fn category_names_are_unique() {
        let mut seen = HashSet::new();

        for (name, _) in KEYWORD_DICTIONARY {
            assert!(seen.insert(*name), "category {name} is declared twice");
        }
    }

    #[test]
    fn every_category_has_keywords() {
        for (name, keywords) in KEYWORD_DICTIONARY {
            assert!(!keywords.is_empty(), "category {name} has no keywords");
        }
    }

    #[test]
    fn keywords_survive_normalization() {
        for (name, keywords) in KEYWORD_DICTIONARY {
            for keyword in *keywords {
                assert!(
                    !normalize(keyword).is_empty(),
                    "keyword {keyword:?} in {name} normalizes to nothing"
                );
            }
        }
    }

    /// Keywords this short are found inside unrelated words unless they are
    /// unusual letter combinations.
    const SHORT_KEYWORDS: &[&str] = &[
        "kfc", "bip", "luz", "cge", "vtr", "gtd", "h m", "dbs", "gym", "bci", "cmr", "pgu", "btc",
        "apv",
    ];

    #[test]
    fn short_keywords_are_allowlisted() {
        for (name, keywords) in KEYWORD_DICTIONARY {
            for keyword in *keywords {
                let normalized = normalize(keyword);

                assert!(
                    normalized.len() > 3 || SHORT_KEYWORDS.contains(&normalized.as_str()),
                    "keyword {keyword:?} in {name} is short enough to match inside other words"
                );
            }
        }
    }

    #[test]
    fn every_category_has_a_kind() {
        for (name, _) in KEYWORD_DICTIONARY {
            assert!(kind_of(name).is_some(), "category {name} has no kind");
        }
    }

    #[test]
    fn looks_up_keywords_by_name() {
        let keywords = keywords_for("Comida").expect("Comida should be in the dictionary");

        assert!(keywords.contains(&"mcdonalds"));
        assert_eq!(keywords_for("No existe"), None);
    }
}
