//! Testes de integração: payload JSON → linhas → registros canônicos

use planilha::types::CellValue;

const PAYLOAD: &str = r#"[
    {
        "OBJECTID": 1,
        "Bairros": "Centro",
        "Área em metros quadrados da edificação": "1.234,56",
        "Produção de energia kW do telhado do edifício": "310,20",
        "Capacidade de Produção de energia em kW por m²": 0.25,
        "Quantidade de Radiação Máxima Solar nos mêses (kW.m²)": "5,9",
        "Quantidade de Placas Fotovoltaicas capaz de gerar a energia gerada do imóvel": 14,
        "Renda Total": "3.200,00",
        "Produção de energia no mês de janeiro kW do telhado do edifício": "30,1",
        "Produção de energia no mês de julho kW do telhado do edifício": "22,7",
        "Quantidade de Radiação Solar no mês de janeiro (kW.m²)": "6,3"
    },
    {
        "OBJECTID": "2",
        "Bairro": "Cohama",
        "Área em metros quadrados da edificação": null,
        "Índice Solar Médio": "4,7",
        "Observação": "telhado compartilhado"
    },
    {
        "OBJECTID": null,
        "Bairros": null,
        "Área em metros quadrados da edificação": ""
    }
]"#;

#[test]
fn test_payload_to_records() {
    let rows = planilha::decode::rows_from_json(PAYLOAD).unwrap();
    // A terceira linha é inteiramente vazia e é descartada na decodificação
    assert_eq!(rows.len(), 2);

    let records = planilha::normalize_dataset(&rows).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.objectid, Some(1));
    assert_eq!(first.bairro.as_deref(), Some("Centro"));
    assert_eq!(first.area_edificacao, 1234.56);
    assert_eq!(first.producao_telhado, 310.2);
    assert_eq!(first.capacidade_por_m2, 0.25);
    assert_eq!(first.radiacao_max, 5.9);
    assert_eq!(first.quantidade_placas, 14.0);
    assert_eq!(first.renda_total, 3200.0);
    assert_eq!(first.dados_mensais_producao[0], 30.1);
    assert_eq!(first.dados_mensais_producao[6], 22.7);
    assert_eq!(first.dados_mensais_producao[1], 0.0);
    assert_eq!(first.dados_mensais_radiacao[0], 6.3);

    let second = &records[1];
    assert_eq!(second.objectid, Some(2));
    assert_eq!(second.bairro.as_deref(), Some("Cohama"));
    // Célula nula em campo numérico vira 0.0
    assert_eq!(second.area_edificacao, 0.0);
    // Coluna alternativa com substring "solar" recupera radiacao_max
    assert_eq!(second.radiacao_max, 4.7);
    // Texto livre fica preservado nos extras, sob a chave heurística
    assert_eq!(
        second.extras.get("observacao"),
        Some(&CellValue::Text("telhado compartilhado".to_string()))
    );
}

#[test]
fn test_normalization_is_idempotent() {
    let rows = planilha::decode::rows_from_json(PAYLOAD).unwrap();
    let a = planilha::normalize_dataset(&rows).unwrap();
    let b = planilha::normalize_dataset(&rows).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_dataset_without_meaningful_data_fails() {
    let payload = r#"[{"OBJECTID": 1, "Bairros": "Centro"}]"#;
    let rows = planilha::decode::rows_from_json(payload).unwrap();
    let err = planilha::normalize_dataset(&rows).unwrap_err();
    assert!(matches!(err, planilha::PlanilhaError::Validation { .. }));
}

#[test]
fn test_dataset_without_identifier_fails() {
    let payload = r#"[{"Bairros": "Centro", "Renda Total": "1,0"}]"#;
    let rows = planilha::decode::rows_from_json(payload).unwrap();
    assert!(planilha::normalize_dataset(&rows).is_err());
}
