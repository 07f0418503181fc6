//! The four planning sheets.

use super::plan::StyleRole::{self, *};
use super::template::{
    ColumnRole, DataColumn, DataLayout, FixedCell, ListColumn, SheetTemplate, TemplateKind,
    TrailingRows,
};
use crate::common::CellRange;
use crate::validation::{ACHIEVEMENT_CHALLENGE, MEASUREMENT_CHALLENGE, YES_NO};

const fn at(row: u32, col: u32, text: &'static str, role: StyleRole) -> FixedCell {
    FixedCell::new(CellRange::from_coords(row, col, row, col), text, role)
}

const fn across(row: u32, first: u32, last: u32, text: &'static str, role: StyleRole) -> FixedCell {
    FixedCell::new(CellRange::row_span(row, first, last), text, role)
}

const fn down(col: u32, first: u32, last: u32, text: &'static str, role: StyleRole) -> FixedCell {
    FixedCell::new(CellRange::column_span(col, first, last), text, role)
}

const fn data(col: u32, role: ColumnRole) -> DataColumn {
    DataColumn::new(col, role)
}

pub(crate) static DEVELOPMENT_CHALLENGE: SheetTemplate = SheetTemplate {
    kind: TemplateKind::DevelopmentChallenge,
    sheet_name: "C. Desafío",
    fixed: &[
        across(1, 1, 6, "C. Desafío para el desarrollo", Title),
        across(
            2,
            1,
            6,
            "Instrucciones: Complete las columnas B, E y F.",
            Instructions,
        ),
        across(
            3,
            1,
            6,
            "¿Cuál es el principal reto de desarrollo que trata de abordar el proyecto?",
            Note,
        ),
        at(4, 1, "Objetivo General", ColumnHeader),
        at(
            4,
            2,
            "Identificar los supuestos\nprincipales que vinculan los\nObjetivos Específicos con el\nObjetivo General",
            AssumptionHeader,
        ),
        at(4, 3, "Objetivo Específico", ColumnHeader),
        at(4, 4, "Indicadores de\nresultado", ColumnHeader),
        at(
            4,
            5,
            "¿Hay alguna dimensión del\nObjetivo Específico que no tenga\nun indicador de resultados?\n[SÍ/NO]",
            ColumnHeader,
        ),
        at(4, 6, "Explique", ColumnHeader),
    ],
    first_data_row: 5,
    layout: DataLayout::PerObjective,
    columns: &[
        data(1, ColumnRole::GeneralObjective),
        data(2, ColumnRole::ObjectiveInput),
        data(3, ColumnRole::ObjectiveName),
        data(4, ColumnRole::IndicatorName),
        data(5, ColumnRole::ObjectiveInput),
        data(6, ColumnRole::ObjectiveInput),
    ],
    column_widths: &[(1, 22.0), (2, 35.0), (3, 22.0), (4, 22.0), (5, 32.0), (6, 15.0)],
    row_heights: &[],
    trailing: Some(TrailingRows {
        labels: &["Indicador GO 1", "Indicador GO 2", "Indicador GO 3"],
        label_col: 1,
        first_col: 1,
        last_col: 6,
    }),
    lists: &[ListColumn::new(5, &YES_NO)],
};

pub(crate) static THEORY_OF_CHANGE: SheetTemplate = SheetTemplate {
    kind: TemplateKind::TheoryOfChange,
    sheet_name: "D. Teoría de Cambio",
    fixed: &[
        across(1, 1, 15, "D. Teoría de Cambio", Title),
        across(
            2,
            1,
            15,
            "Instrucciones: Por favor llene las secciones A y B (secciones en verde).",
            Instructions,
        ),
        across(
            4,
            7,
            11,
            "A. Cambios en los Productos\nRellene la celda con el valor 1 si alguna de las siguientes opciones aplica a cada producto.",
            GroupBanner,
        ),
        at(5, 1, "Declaración de componentes", ColumnHeader),
        at(5, 2, "ID Componente", ColumnHeader),
        at(5, 3, "ID Producto", VerticalColumnHeader),
        at(5, 4, "Definición del Producto", ColumnHeader),
        at(5, 5, "Producto Desactivado", VerticalDerivedHeader),
        at(5, 6, "Advertencia", VerticalColumnHeader),
        at(5, 7, "Cancelado o Desactivado", SectionHeader),
        at(5, 8, "Retrasado", SectionHeader),
        at(5, 9, "Cambio en el Alcance Financiero", SectionHeader),
        at(5, 10, "Cambio en el Alcance Físico", SectionHeader),
        at(5, 11, "Nuevo producto", SectionHeader),
        at(5, 12, "El Producto ha sufrido cambios", DerivedHeader),
        at(
            5,
            13,
            "Para productos con cambios,\nexplique las causas",
            ExplanationHeader,
        ),
        at(
            5,
            14,
            "Productos gatilladores\npara logro de resultados",
            DerivedHeader,
        ),
        at(
            5,
            15,
            "Para los productos gatilladores,\nidentifique los principales supuestos\npara el logro de resultados",
            AssumptionHeader,
        ),
    ],
    first_data_row: 6,
    layout: DataLayout::Components,
    columns: &[],
    column_widths: &[
        (1, 19.0),
        (2, 19.0),
        (3, 19.0),
        (4, 19.0),
        (5, 19.0),
        (6, 19.0),
        (7, 19.0),
        (8, 19.0),
        (9, 19.0),
        (10, 19.0),
        (11, 19.0),
        (12, 19.0),
        (13, 19.0),
        (14, 19.0),
        (15, 19.0),
    ],
    row_heights: &[(4, 60.0)],
    trailing: None,
    lists: &[],
};

pub(crate) static RESULT_MEASUREMENT: SheetTemplate = SheetTemplate {
    kind: TemplateKind::ResultMeasurement,
    sheet_name: "E. Medición",
    fixed: &[
        across(1, 1, 18, "E. Medición de Resultados", Title),
        across(
            2,
            1,
            18,
            "Instrucciones: complete las columnas H-I y K-R para cada Indicador de Resultado.",
            Instructions,
        ),
        across(
            3,
            1,
            18,
            "Nota: Los valores corresponden a la Matriz de Resultados reportada en el Plan de Arranque.",
            Note,
        ),
        across(4, 9, 18, "Medición de Resultados", GroupBanner),
        down(
            8,
            5,
            6,
            "¿Cuándo se incluyó el indicador en la Matriz de Resultados?\n(seleccione una opción)",
            QuestionHeader,
        ),
        down(
            9,
            5,
            6,
            "Medios de Verificación\n(información obtenida de Convergencia)",
            ReferenceHeader,
        ),
        down(
            10,
            5,
            6,
            "Observaciones del Indicador\n(información obtenida de Convergencia)",
            ReferenceHeader,
        ),
        down(
            11,
            5,
            6,
            "Método de Cálculo\n(explique la metodología)",
            SectionHeader,
        ),
        down(
            12,
            5,
            6,
            "Método de Atribución\n(ej. Antes y Después, Evaluación de Impacto)",
            SectionHeader,
        ),
        across(5, 13, 15, "Si la fuente de datos ya existe", SectionHeader),
        across(
            5,
            16,
            17,
            "Si se recopilarán datos para la evaluación",
            SectionHeader,
        ),
        down(
            18,
            5,
            6,
            "Otros problemas\no consideraciones de medición",
            SectionHeader,
        ),
        at(6, 1, "Objetivos Específicos", ColumnHeader),
        at(6, 2, "Indicador de Resultado", ColumnHeader),
        at(6, 3, "Desagregación", ColumnHeader),
        at(6, 4, "Unidad de Medida", ColumnHeader),
        at(6, 5, "Línea de Base", ColumnHeader),
        at(6, 6, "Año Línea de Base", ColumnHeader),
        at(6, 7, "Meta", ColumnHeader),
        at(
            6,
            13,
            "Fuente de Datos\n(definir la fuente de datos)",
            SectionHeader,
        ),
        at(
            6,
            14,
            "Acceso a Datos\n(definir el proceso para acceder a los datos)",
            SectionHeader,
        ),
        at(
            6,
            15,
            "Periodicidad de los Datos\n(¿Está alineada a la medición?)",
            SectionHeader,
        ),
        at(
            6,
            16,
            "Plan de recolección de Datos\n(plan y consideraciones de tiempos)",
            SectionHeader,
        ),
        at(
            6,
            17,
            "Responsable\n(definir quién es responsable)",
            SectionHeader,
        ),
    ],
    first_data_row: 7,
    layout: DataLayout::PerObjective,
    columns: &[
        data(1, ColumnRole::ObjectiveName),
        data(2, ColumnRole::IndicatorName),
        data(3, ColumnRole::IndicatorInput),
        data(4, ColumnRole::IndicatorInput),
        data(5, ColumnRole::IndicatorInput),
        data(6, ColumnRole::IndicatorInput),
        data(7, ColumnRole::IndicatorInput),
        data(8, ColumnRole::IndicatorInput),
        data(9, ColumnRole::IndicatorInput),
        data(10, ColumnRole::IndicatorInput),
        data(11, ColumnRole::IndicatorInput),
        data(12, ColumnRole::IndicatorInput),
        data(13, ColumnRole::IndicatorInput),
        data(14, ColumnRole::IndicatorInput),
        data(15, ColumnRole::IndicatorInput),
        data(16, ColumnRole::IndicatorInput),
        data(17, ColumnRole::IndicatorInput),
        data(18, ColumnRole::IndicatorInput),
    ],
    column_widths: &[
        (1, 25.0),
        (2, 22.0),
        (3, 18.0),
        (4, 15.0),
        (5, 15.0),
        (6, 15.0),
        (7, 10.0),
        (8, 30.0),
        (9, 28.0),
        (10, 28.0),
        (11, 30.0),
        (12, 26.0),
        (13, 18.0),
        (14, 18.0),
        (15, 20.0),
        (16, 32.0),
        (17, 18.0),
        (18, 30.0),
    ],
    row_heights: &[],
    trailing: None,
    lists: &[],
};

pub(crate) static SUMMARY: SheetTemplate = SheetTemplate {
    kind: TemplateKind::Summary,
    sheet_name: "F. Resumen",
    fixed: &[
        across(1, 1, 16, "F. Resumen y próximos pasos", Title),
        across(
            2,
            1,
            16,
            "Instrucciones: Resuma los principales desafíos (columnas H-P) e identifique los próximos pasos.",
            Instructions,
        ),
        across(
            3,
            1,
            16,
            "Nota: Esta sección debe completarse con la información de Desafíos y Acciones potenciales.",
            Note,
        ),
        across(4, 8, 11, "Logro del Resultado (Teoría de Cambio)", GroupBanner),
        across(4, 12, 16, "Medición", GroupBanner),
        across(
            5,
            8,
            11,
            "Desafíos identificados relacionados al logro de los resultados",
            SubBanner,
        ),
        across(
            5,
            12,
            16,
            "Desafíos identificados relacionados con la medición de resultados",
            SubBanner,
        ),
        at(6, 1, "Objetivos Específicos", ColumnHeader),
        at(6, 2, "Indicadores de Resultado", ColumnHeader),
        at(6, 3, "Desagregación", ColumnHeader),
        at(6, 4, "Unidad de Medida", ColumnHeader),
        at(6, 5, "Línea de Base", ColumnHeader),
        at(6, 6, "Año de Línea de Base", ColumnHeader),
        at(6, 7, "Meta", ColumnHeader),
        at(6, 8, "Si/No\n(Seleccione una opción)", ReferenceHeader),
        at(6, 9, "Tipo de desafío\n(Seleccione una opción)", ReferenceHeader),
        at(6, 10, "Explique", ReferenceHeader),
        at(6, 11, "Soluciones propuestas", ReferenceHeader),
        at(6, 12, "Si/No\n(Seleccione una opción)", ReferenceHeader),
        at(6, 13, "Tipo de desafío\n(Seleccione una opción)", ReferenceHeader),
        at(6, 14, "Explique", ReferenceHeader),
        at(
            6,
            15,
            "¿Se miden todas las dimensiones del Objetivo Específico?",
            ReferenceHeader,
        ),
        at(6, 16, "Soluciones propuestas", ReferenceHeader),
    ],
    first_data_row: 7,
    layout: DataLayout::PerObjective,
    columns: &[
        data(1, ColumnRole::ObjectiveName),
        data(2, ColumnRole::IndicatorName),
        data(3, ColumnRole::IndicatorInput),
        data(4, ColumnRole::IndicatorInput),
        data(5, ColumnRole::IndicatorInput),
        data(6, ColumnRole::IndicatorInput),
        data(7, ColumnRole::IndicatorInput),
        data(8, ColumnRole::IndicatorInput),
        data(9, ColumnRole::IndicatorInput),
        data(10, ColumnRole::IndicatorInput),
        data(11, ColumnRole::IndicatorInput),
        data(12, ColumnRole::IndicatorInput),
        data(13, ColumnRole::IndicatorInput),
        data(14, ColumnRole::IndicatorInput),
        data(15, ColumnRole::IndicatorInput),
        data(16, ColumnRole::IndicatorInput),
    ],
    column_widths: &[
        (1, 25.0),
        (2, 28.0),
        (3, 20.0),
        (4, 18.0),
        (5, 18.0),
        (6, 20.0),
        (7, 15.0),
        (8, 10.0),
        (9, 22.0),
        (10, 28.0),
        (11, 28.0),
        (12, 10.0),
        (13, 22.0),
        (14, 28.0),
        (15, 28.0),
        (16, 28.0),
    ],
    row_heights: &[],
    trailing: None,
    lists: &[
        ListColumn::new(8, &YES_NO),
        ListColumn::new(9, &ACHIEVEMENT_CHALLENGE),
        ListColumn::new(12, &YES_NO),
        ListColumn::new(13, &MEASUREMENT_CHALLENGE),
    ],
};
