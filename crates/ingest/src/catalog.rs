//! Static query catalogs, one per dataset variant.
//!
//! Each variant is a curated, ordered list of search queries. Order
//! matters: batch offsets index into these lists, so entries are only
//! ever appended, never reordered.

/// One dataset variant: a named, static list of search queries.
#[derive(Debug, Clone, Copy)]
pub struct QueryCatalog {
    pub id: &'static str,
    pub title: &'static str,
    pub queries: &'static [&'static str],
}

impl QueryCatalog {
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Slice `[start, start + size)`, clamped to the catalog length.
    pub fn slice(&self, start: usize, size: usize) -> &'static [&'static str] {
        let start = start.min(self.queries.len());
        let end = start.saturating_add(size).min(self.queries.len());
        &self.queries[start..end]
    }
}

/// Look up a dataset variant by id.
pub fn find_catalog(id: &str) -> Option<&'static QueryCatalog> {
    CATALOGS.iter().find(|c| c.id == id)
}

pub const CATALOGS: &[QueryCatalog] = &[
    QueryCatalog {
        id: "classicos-brasileiros",
        title: "Clássicos da literatura brasileira",
        queries: CLASSICOS_BRASILEIROS,
    },
    QueryCatalog {
        id: "contemporaneos",
        title: "Literatura brasileira contemporânea",
        queries: CONTEMPORANEOS,
    },
    QueryCatalog {
        id: "infantojuvenil",
        title: "Literatura infantojuvenil",
        queries: INFANTOJUVENIL,
    },
];

const CLASSICOS_BRASILEIROS: &[&str] = &[
    "Dom Casmurro Machado de Assis",
    "Memórias Póstumas de Brás Cubas Machado de Assis",
    "Quincas Borba Machado de Assis",
    "Helena Machado de Assis",
    "O Cortiço Aluísio Azevedo",
    "O Mulato Aluísio Azevedo",
    "O Guarani José de Alencar",
    "Iracema José de Alencar",
    "Senhora José de Alencar",
    "Lucíola José de Alencar",
    "A Moreninha Joaquim Manuel de Macedo",
    "O Ateneu Raul Pompeia",
    "Triste Fim de Policarpo Quaresma Lima Barreto",
    "Clara dos Anjos Lima Barreto",
    "Os Sertões Euclides da Cunha",
    "Macunaíma Mário de Andrade",
    "Vidas Secas Graciliano Ramos",
    "São Bernardo Graciliano Ramos",
    "Angústia Graciliano Ramos",
    "Memórias do Cárcere Graciliano Ramos",
    "Capitães da Areia Jorge Amado",
    "Gabriela Cravo e Canela Jorge Amado",
    "Dona Flor e Seus Dois Maridos Jorge Amado",
    "Tenda dos Milagres Jorge Amado",
    "Grande Sertão Veredas João Guimarães Rosa",
    "Sagarana João Guimarães Rosa",
    "Primeiras Estórias João Guimarães Rosa",
    "A Hora da Estrela Clarice Lispector",
    "Perto do Coração Selvagem Clarice Lispector",
    "Laços de Família Clarice Lispector",
    "A Paixão Segundo G.H. Clarice Lispector",
    "O Quinze Rachel de Queiroz",
    "Memorial de Maria Moura Rachel de Queiroz",
    "Fogo Morto José Lins do Rego",
    "Menino de Engenho José Lins do Rego",
    "A Escrava Isaura Bernardo Guimarães",
];

const CONTEMPORANEOS: &[&str] = &[
    "Torto Arado Itamar Vieira Junior",
    "Salvar o Fogo Itamar Vieira Junior",
    "O Avesso da Pele Jeferson Tenório",
    "Quarto de Despejo Carolina Maria de Jesus",
    "Cidade de Deus Paulo Lins",
    "Dois Irmãos Milton Hatoum",
    "Relato de um Certo Oriente Milton Hatoum",
    "Cinzas do Norte Milton Hatoum",
    "Leite Derramado Chico Buarque",
    "Budapeste Chico Buarque",
    "O Irmão Alemão Chico Buarque",
    "O Sol na Cabeça Geovani Martins",
    "Via Ápia Geovani Martins",
    "O Peso do Pássaro Morto Aline Bei",
    "Pequena Coreografia do Adeus Aline Bei",
    "Tudo é Rio Carla Madeira",
    "A Natureza da Mordida Carla Madeira",
    "Véspera Carla Madeira",
    "A Resistência Julián Fuks",
    "A Ocupação Julián Fuks",
    "Outros Jeitos de Usar a Boca Rupi Kaur",
    "Sejamos Todos Feministas Chimamanda Ngozi Adichie",
    "É Assim que Acaba Colleen Hoover",
    "A Vida Invisível de Eurídice Gusmão Martha Batalha",
];

const INFANTOJUVENIL: &[&str] = &[
    "O Menino Maluquinho Ziraldo",
    "Uma Professora Muito Maluquinha Ziraldo",
    "A Bolsa Amarela Lygia Bojunga",
    "Os Colegas Lygia Bojunga",
    "O Meu Pé de Laranja Lima José Mauro de Vasconcelos",
    "Marcelo Marmelo Martelo Ruth Rocha",
    "O Reizinho Mandão Ruth Rocha",
    "A Arca de Noé Vinicius de Moraes",
    "Reinações de Narizinho Monteiro Lobato",
    "Caçadas de Pedrinho Monteiro Lobato",
    "O Saci Monteiro Lobato",
    "Chapeuzinho Amarelo Chico Buarque",
    "O Pequeno Príncipe Antoine de Saint-Exupéry",
    "O Gênio do Crime João Carlos Marinho",
    "A Ilha Perdida Maria José Dupré",
    "Éramos Seis Maria José Dupré",
    "O Escaravelho do Diabo Lúcia Machado de Almeida",
    "A Droga da Obediência Pedro Bandeira",
    "A Marca de uma Lágrima Pedro Bandeira",
    "O Fantástico Mistério de Feiurinha Pedro Bandeira",
    "Fala Sério Mãe Thalita Rebouças",
    "Extraordinário R.J. Palacio",
];
